use std::fmt;

/// Data API operation, also used as the `/action/<name>` URL suffix.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Action {
    FindOne,
    Find,
    InsertOne,
    InsertMany,
    DeleteOne,
    DeleteMany,
    UpdateOne,
    UpdateMany,
    ReplaceOne,
    Aggregate,
}

impl Action {
    pub const ALL: [Action; 10] = [
        Action::FindOne,
        Action::Find,
        Action::InsertOne,
        Action::InsertMany,
        Action::DeleteOne,
        Action::DeleteMany,
        Action::UpdateOne,
        Action::UpdateMany,
        Action::ReplaceOne,
        Action::Aggregate,
    ];

    /// Wire name of the action, e.g. `"insertMany"`.
    pub fn as_str(self) -> &'static str {
        match self {
            Action::FindOne => "findOne",
            Action::Find => "find",
            Action::InsertOne => "insertOne",
            Action::InsertMany => "insertMany",
            Action::DeleteOne => "deleteOne",
            Action::DeleteMany => "deleteMany",
            Action::UpdateOne => "updateOne",
            Action::UpdateMany => "updateMany",
            Action::ReplaceOne => "replaceOne",
            Action::Aggregate => "aggregate",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Joins an endpoint base URL with the action suffix.
pub(crate) fn action_url(endpoint: &str, action: Action) -> String {
    format!("{}/action/{}", endpoint.trim_end_matches('/'), action)
}
