pub struct Cleaner;

impl Cleaner {
    /// Trims the input and drops control characters other than line breaks and tabs.
    pub fn clean(input: &str) -> String {
        input
            .trim()
            .chars()
            .filter(|&c| !c.is_control() || c == '\n' || c == '\r' || c == '\t')
            .collect()
    }
}
