#[derive(sqlx::FromRow)]
pub(crate) struct SpeakerRow {
    pub(crate) unit_id: i64,
    pub(crate) group_position: i64,
    /// `None` marks a group without any speakers.
    pub(crate) name: Option<String>,
}

/// Folds rows of one unit, ordered by group and position, back into groups.
pub(crate) fn group(rows: impl IntoIterator<Item = SpeakerRow>) -> Vec<Vec<String>> {
    let mut groups: Vec<Vec<String>> = Vec::new();
    let mut current = None;
    for row in rows {
        if current != Some(row.group_position) {
            current = Some(row.group_position);
            groups.push(Vec::new());
        }
        if let (Some(group), Some(name)) = (groups.last_mut(), row.name) {
            group.push(name);
        }
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(group_position: i64, name: &str) -> SpeakerRow {
        SpeakerRow { unit_id: 1, group_position, name: Some(name.to_string()) }
    }

    fn placeholder(group_position: i64) -> SpeakerRow {
        SpeakerRow { unit_id: 1, group_position, name: None }
    }

    #[test]
    fn test_group_rows() {
        let groups = group(vec![
            row(0, "Justus Jonas"),
            row(0, "Oliver Rohrbeck"),
            row(1, "Erzähler"),
            row(3, "Tante Mathilda"),
        ]);
        assert_eq!(
            groups,
            vec![
                vec!["Justus Jonas".to_string(), "Oliver Rohrbeck".to_string()],
                vec!["Erzähler".to_string()],
                vec!["Tante Mathilda".to_string()],
            ]
        );
    }

    #[test]
    fn test_group_keeps_empty_groups() {
        let groups = group(vec![row(0, "Justus Jonas"), placeholder(1), row(2, "Bob Andrews")]);
        assert_eq!(groups, vec![vec!["Justus Jonas".to_string()], vec![], vec!["Bob Andrews".to_string()]]);
        assert_eq!(group(vec![placeholder(0)]), vec![Vec::<String>::new()]);
    }

    #[test]
    fn test_group_no_rows() {
        assert!(group(Vec::new()).is_empty());
    }
}
