/// Category label used in reports for expenses without a (known) category.
pub const UNCATEGORIZED_LABEL: &str = "Uncategorized";

/// Inclusive upper bound for goal alert percentages.
pub const MAX_ALERT_PERCENT: u32 = 100;

/// Description prefix for expenses recorded by goal contributions.
pub const CONTRIBUTION_DESCRIPTION_PREFIX: &str = "Savings contribution";
