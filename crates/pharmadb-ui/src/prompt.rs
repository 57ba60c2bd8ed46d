/// User-facing prompts: a blocking yes/no confirmation and a one-line notice.
pub trait Prompter {
    /// Returns `true` only when the user explicitly agrees.
    fn confirm(&self, message: &str) -> bool;

    fn notify(&self, message: &str);
}
