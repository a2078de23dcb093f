/// What to do with a line whose id field is not a valid integer
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum IdPolicy {
    /// Fail the run with a malformed record error
    #[default]
    Strict,
    /// Log a warning and use id 0. The original id text is still written to the output.
    Zero,
}
