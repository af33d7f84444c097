/// The expression being edited and whether a result is currently shown.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CalculationState {
    expression: String,
    calculation_done: bool,
}

impl CalculationState {
    pub fn new() -> Self {
        Self::default()
    }

    /// The current expression text.
    pub fn expression(&self) -> &str {
        &self.expression
    }

    /// Whether the last action was a successful or failed evaluation.
    pub fn is_calculation_done(&self) -> bool {
        self.calculation_done
    }

    pub fn set_expression(&mut self, expression: impl Into<String>) {
        self.expression = expression.into();
    }

    pub fn clear_expression(&mut self) {
        self.expression.clear();
    }

    pub fn mark_calculation_done(&mut self) {
        self.calculation_done = true;
    }

    pub fn reset_calculation_state(&mut self) {
        self.calculation_done = false;
    }
}
