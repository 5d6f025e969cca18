/// The fixed vocabulary of shell commands the dataset is built from.
pub const COMMANDS: [&str; 15] = [
    "ls -la /home",
    "cd /usr/local/bin",
    "cp file1.txt file2.txt",
    "mv document.pdf Downloads",
    "rm temp.txt",
    "mkdir new_directory",
    "touch newfile.txt",
    "chmod 755 script.sh",
    "grep pattern file.txt",
    "find . -name *.py",
    "ps aux | grep process",
    "df -h",
    "pwd",
    "tar -czf archive.tar.gz files",
    "wget https://example.com/file",
];

/// Generates the synthetic command dataset.
///
/// # Arguments
/// * `repetitions` - How many times the whole command list is repeated.
///
/// # Returns
/// `COMMANDS.len() * repetitions` commands, the full list followed by itself again and again.
pub fn generate_commands(repetitions: usize) -> Vec<&'static str> {
    COMMANDS
        .iter()
        .copied()
        .cycle()
        .take(COMMANDS.len() * repetitions)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_dataset_has_150_commands() {
        assert_eq!(generate_commands(10).len(), 150);
    }

    #[test]
    fn list_is_repeated_in_order() {
        let commands = generate_commands(2);
        assert_eq!(&commands[..15], &COMMANDS);
        assert_eq!(&commands[15..], &COMMANDS);
    }

    #[test]
    fn zero_repetitions_is_empty() {
        assert!(generate_commands(0).is_empty());
    }
}
