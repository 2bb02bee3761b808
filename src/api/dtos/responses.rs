use crate::domain::services::availability::Slot;
use serde::Serialize;

#[derive(Serialize)]
pub struct SlotsResponse {
    pub date: String,
    pub slots: Vec<Slot>,
}

#[derive(Serialize)]
pub struct SlotCheckResponse {
    pub day: u8,
    pub start: String,
    pub end: String,
    pub available: bool,
}
