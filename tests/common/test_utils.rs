use std::{fs, path::PathBuf};

/// Temporary command/output file that is removed when dropped
pub struct TestFile {
    path: PathBuf,
}

impl TestFile {
    /// Create a path in the system temp dir based on the test name
    pub fn new(test_name: &str) -> Self {
        let path = std::env::temp_dir()
            .join(format!("cuckoo_test_{}_{}", test_name, std::process::id()));
        Self { path }
    }

    /// Same as `new`, with `contents` already written
    #[allow(dead_code)]
    pub fn with_contents(test_name: &str, contents: &str) -> Self {
        let file = Self::new(test_name);
        fs::write(&file.path, contents).expect("Failed to write test file");
        file
    }

    /// Same as `new`, with raw `bytes` already written
    #[allow(dead_code)]
    pub fn with_bytes(test_name: &str, bytes: &[u8]) -> Self {
        let file = Self::new(test_name);
        fs::write(&file.path, bytes).expect("Failed to write test file");
        file
    }

    pub fn path(&self) -> PathBuf {
        self.path.clone()
    }

    #[allow(dead_code)]
    pub fn read(&self) -> String {
        fs::read_to_string(&self.path).expect("Failed to read test file")
    }
}

impl Drop for TestFile {
    fn drop(&mut self) {
        if self.path.exists() {
            let _ = fs::remove_file(&self.path);
        }
    }
}
