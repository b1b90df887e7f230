#[derive(Debug, Clone)]
pub enum QueryAction {
    /// Answers an open query. A query is answered at most once.
    Respond { officer_id: String, response: String },
}
