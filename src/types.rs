use crate::content::Listing;

#[derive(PartialEq, Clone, Copy, Debug)]
pub enum AppMode {
    Normal,
    Insert,
}

#[derive(Clone, Debug)]
pub enum BgEvent {
    Loaded { request_id: u64, listing: Listing },
    Error { request_id: u64, message: String },
}

impl BgEvent {
    pub fn request_id(&self) -> u64 {
        match self {
            BgEvent::Loaded { request_id, .. } | BgEvent::Error { request_id, .. } => *request_id,
        }
    }
}
