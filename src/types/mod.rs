//! Public types for the Segscope API.

mod notification;
mod profile;
mod record;

pub use notification::{Notification, NotificationLevel, Notifications};
pub use profile::{CLUSTER_PROFILES, ClusterProfile};
pub use record::{ClassificationRecord, RfmValues, parse_records};
