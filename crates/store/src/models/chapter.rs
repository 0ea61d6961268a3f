use dreimeta_catalog::models::Chapter;

#[derive(sqlx::FromRow)]
pub(crate) struct ChapterRow {
    pub(crate) unit_id: i64,
    pub(crate) title: String,
    #[sqlx(default)]
    pub(crate) start_ms: Option<i64>,
    #[sqlx(default)]
    pub(crate) end_ms: Option<i64>,
}
impl From<ChapterRow> for Chapter {
    fn from(row: ChapterRow) -> Self {
        Chapter::new(row.title, row.start_ms, row.end_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Some(0), Some(183_000))]
    #[case(Some(183_000), None)]
    #[case(None, None)]
    fn test_row_into_chapter(#[case] start_ms: Option<i64>, #[case] end_ms: Option<i64>) {
        let row = ChapterRow { unit_id: 1, title: "Intro".to_string(), start_ms, end_ms };
        assert_eq!(Chapter::from(row), Chapter::new("Intro", start_ms, end_ms));
    }
}
