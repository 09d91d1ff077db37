#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RowKind {
    Income,
    Expense,
}

impl RowKind {
    /// Income is checked first, so a row tagged both ways is tinted as income.
    pub fn classify(
        has_class: impl Fn(&str) -> bool,
        income_class: &str,
        expense_class: &str,
    ) -> Option<Self> {
        if has_class(income_class) {
            Some(RowKind::Income)
        } else if has_class(expense_class) {
            Some(RowKind::Expense)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(classes: &[&str]) -> Option<RowKind> {
        RowKind::classify(|class| classes.contains(&class), "income", "expense")
    }

    #[test]
    fn tagged_rows_are_classified() {
        assert_eq!(classify(&["row", "income"]), Some(RowKind::Income));
        assert_eq!(classify(&["expense"]), Some(RowKind::Expense));
    }

    #[test]
    fn untagged_rows_are_left_alone() {
        assert_eq!(classify(&[]), None);
        assert_eq!(classify(&["transfer", "incomes"]), None);
    }

    #[test]
    fn income_wins_over_expense() {
        assert_eq!(classify(&["expense", "income"]), Some(RowKind::Income));
    }
}
