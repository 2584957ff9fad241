//! Notification banners: document shape, activation policy, editor actions
//! and the live watcher.

pub mod clock;
pub mod model;
pub mod selector;
pub mod service;
pub mod watcher;

pub use clock::{Clock, SystemClock};
pub use model::{ImageType, NotificationDocument, NotificationDraft, NotificationText};
pub use selector::{next_recheck, select_active};
pub use service::NotificationService;
pub use watcher::NotificationWatcher;
