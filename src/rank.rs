//! Trusted-first ordering
//!
//! A stable two-way partition: trusted links keep their document order, then
//! untrusted links keep theirs. Duplicates are kept.

use crate::classify::Link;

/// Order links trusted-first without disturbing relative order.
pub fn rank(links: Vec<Link>) -> Vec<Link> {
    let (mut trusted, untrusted): (Vec<Link>, Vec<Link>) =
        links.into_iter().partition(|link| link.is_trusted);
    trusted.extend(untrusted);
    trusted
}
