use crate::models::{Group, GuestRequest, UnplacedGuest};

/// Place each approved guest into their host's group
///
/// Guests are handled in ascending request id order and a repeated request id
/// is placed once. Guests ride along with their host and do not count towards
/// capacity or harmony. A guest whose host is not playing is returned instead
/// of being dropped.
pub fn attach_guests(groups: &mut [Group], guests: &[GuestRequest]) -> Vec<UnplacedGuest> {
    let mut ordered: Vec<&GuestRequest> = guests.iter().collect();
    ordered.sort_by(|a, b| {
        a.guest_request_id
            .cmp(&b.guest_request_id)
            .then_with(|| a.host_profile_id.cmp(&b.host_profile_id))
    });
    ordered.dedup_by(|a, b| a.guest_request_id == b.guest_request_id);

    let mut unplaced = Vec::new();
    for guest in ordered {
        match groups.iter_mut().find(|g| g.contains(&guest.host_profile_id)) {
            Some(group) => group.guests.push(guest.guest_request_id.clone()),
            None => {
                tracing::warn!(
                    "Guest {} could not be placed: host {} is not confirmed",
                    guest.guest_request_id,
                    guest.host_profile_id
                );
                unplaced.push(guest.clone());
            }
        }
    }

    unplaced
}
