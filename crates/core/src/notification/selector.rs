use chrono::{DateTime, Utc};

use super::model::NotificationDocument;

/// The single banner to show at `now`, if any.
///
/// Among several eligible documents the lowest id wins, so the result does
/// not depend on the order the store returned them in.
pub fn select_active(
    now: DateTime<Utc>,
    documents: &[NotificationDocument],
) -> Option<&NotificationDocument> {
    documents
        .iter()
        .filter(|doc| doc.is_eligible(now))
        .min_by(|a, b| a.id.cmp(&b.id))
}

/// Earliest future schedule among active documents: the next instant the
/// selection can change without any write.
pub fn next_recheck(
    now: DateTime<Utc>,
    documents: &[NotificationDocument],
) -> Option<DateTime<Utc>> {
    documents
        .iter()
        .filter(|doc| doc.is_active)
        .filter_map(|doc| doc.scheduled_date)
        .filter(|at| *at > now)
        .min()
}
