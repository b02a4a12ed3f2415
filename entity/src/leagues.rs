use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const TABLE: &str = "leagues";

pub mod columns {
    pub const ID: &str = "id";
    pub const NAME: &str = "name";
    pub const COMMISSIONER: &str = "commissioner";
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Model {
    pub id: Uuid,
    pub name: String,
    pub commissioner: Option<Uuid>,
}

#[derive(Clone, Debug, Serialize)]
pub struct New {
    pub name: String,
    pub commissioner: Option<Uuid>,
}
