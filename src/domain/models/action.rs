use super::PendingQuery;

pub enum Action {
    SendQuery(PendingQuery),
}
