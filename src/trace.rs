/// The ordered record of everything the reducer did to a term.
///
/// Every rewriting action (substitution, alpha conversion, beta reduction,
/// structural reduction of a sub-term) appends exactly one line. Lines are
/// never removed or reordered, so the trace reads as a replay of the
/// reduction from top to bottom:
///
/// ```
/// use lambda_steps::trace::Trace;
///
/// let mut trace = Trace::new();
/// trace.log("Reducing: ((# x . x) y)");
/// trace.log("Beta Reduction: ((# x . x)) (y) -> y");
/// assert_eq!(trace.steps().len(), 2);
/// ```
///
/// A `Trace` belongs to a single evaluation request; requests never share
/// one.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Trace {
    steps: Vec<String>,
}

impl Trace {
    pub fn new() -> Trace {
        Trace { steps: Vec::new() }
    }

    /// Appends one step description. Append-only: there is no way to edit
    /// or drop a line once logged.
    pub fn log<S: Into<String>>(&mut self, step: S) {
        self.steps.push(step.into());
    }

    pub fn steps(&self) -> &[String] {
        &self.steps
    }

    pub fn into_steps(self) -> Vec<String> {
        self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}
