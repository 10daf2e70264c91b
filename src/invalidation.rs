//! Which collections a successful write makes stale.
//!
//! Book rows carry author and genre names, so writes to either also
//! invalidate books.

use crate::record::EntityKind;

const AUTHOR_WRITES: &[EntityKind] = &[EntityKind::Author, EntityKind::Book];
const GENRE_WRITES: &[EntityKind] = &[EntityKind::Genre, EntityKind::Book];
const BOOK_WRITES: &[EntityKind] = &[EntityKind::Book];

/// Collections to refresh, in order, after a successful write to `kind`.
pub fn invalidated_by(kind: EntityKind) -> &'static [EntityKind] {
    match kind {
        EntityKind::Author => AUTHOR_WRITES,
        EntityKind::Genre => GENRE_WRITES,
        EntityKind::Book => BOOK_WRITES,
    }
}
