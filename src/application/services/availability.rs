//! Availability calculation over the room-interval ledger

use std::collections::HashSet;
use std::sync::Arc;

use chrono::NaiveDate;

use crate::domain::{DomainError, DomainResult, RepositoryProvider, Room};

/// Computes which rooms are free for a requested date range.
///
/// A room is unavailable when any non-cancelled booking holding it
/// overlaps the half-open `[check_in, check_out)` interval. Rooms
/// under maintenance are excluded regardless of date overlap.
pub struct AvailabilityService {
    repos: Arc<dyn RepositoryProvider>,
}

impl AvailabilityService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    /// Rooms free for the whole `[check_in, check_out)` range.
    ///
    /// `exclude_booking_code` skips one booking's own holds, used when
    /// re-validating an existing booking against its own rooms.
    pub async fn available_rooms(
        &self,
        check_in: NaiveDate,
        check_out: NaiveDate,
        exclude_booking_code: Option<&str>,
    ) -> DomainResult<Vec<Room>> {
        validate_date_range(check_in, check_out)?;

        let held = self
            .held_room_numbers(check_in, check_out, exclude_booking_code)
            .await?;

        let rooms = self.repos.rooms().find_all().await?;
        Ok(rooms
            .into_iter()
            .filter(|r| r.is_sellable() && !held.contains(&r.room_no))
            .collect())
    }

    /// Subset of `requested` that is NOT free for the range.
    ///
    /// This is the predicate booking creation enforces: creation is
    /// rejected unless the returned set is empty.
    pub async fn unavailable_rooms(
        &self,
        requested: &[i32],
        check_in: NaiveDate,
        check_out: NaiveDate,
        exclude_booking_code: Option<&str>,
    ) -> DomainResult<Vec<i32>> {
        let available: HashSet<i32> = self
            .available_rooms(check_in, check_out, exclude_booking_code)
            .await?
            .into_iter()
            .map(|r| r.room_no)
            .collect();

        Ok(requested
            .iter()
            .copied()
            .filter(|no| !available.contains(no))
            .collect())
    }

    async fn held_room_numbers(
        &self,
        check_in: NaiveDate,
        check_out: NaiveDate,
        exclude_booking_code: Option<&str>,
    ) -> DomainResult<HashSet<i32>> {
        let blocking = self
            .repos
            .bookings()
            .find_blocking_overlapping(check_in, check_out)
            .await?;

        Ok(blocking
            .iter()
            .filter(|b| exclude_booking_code != Some(b.code.as_str()))
            .flat_map(|b| b.room_numbers.iter().copied())
            .collect())
    }
}

pub(crate) fn validate_date_range(check_in: NaiveDate, check_out: NaiveDate) -> DomainResult<()> {
    if check_out <= check_in {
        return Err(DomainError::Validation(format!(
            "check_out ({}) must be after check_in ({})",
            check_out, check_in
        )));
    }
    Ok(())
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Booking, Guest, RoomStatus, RoomType};
    use crate::infrastructure::storage::InMemoryRepositoryProvider;
    use chrono::Utc;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn room(no: i32) -> crate::domain::Room {
        crate::domain::Room::new(no, RoomType::Double, 10_000, 2)
    }

    fn booking(code: &str, room_no: i32, check_in: NaiveDate, check_out: NaiveDate) -> Booking {
        Booking {
            code: code.to_string(),
            guest: Guest {
                name: "Guest".into(),
                phone: "000".into(),
                identity_number: "ID".into(),
                nationality: "VN".into(),
                address: "".into(),
            },
            guest_count: 1,
            check_in,
            check_out,
            room_numbers: vec![room_no],
            special_requests: None,
            foreign_guest: false,
            cancelled: false,
            checked_out: false,
            service_ids: vec![],
            idempotency_key: None,
            created_at: Utc::now(),
        }
    }

    async fn setup() -> (AvailabilityService, Arc<InMemoryRepositoryProvider>) {
        let repos = Arc::new(InMemoryRepositoryProvider::new());
        repos.rooms().save(room(101)).await.unwrap();
        repos.rooms().save(room(102)).await.unwrap();
        let service = AvailabilityService::new(repos.clone());
        (service, repos)
    }

    #[tokio::test]
    async fn all_rooms_free_without_bookings() {
        let (service, _repos) = setup().await;
        let free = service
            .available_rooms(date(2024, 2, 1), date(2024, 2, 5), None)
            .await
            .unwrap();
        assert_eq!(free.len(), 2);
    }

    #[tokio::test]
    async fn overlapping_booking_blocks_room() {
        let (service, repos) = setup().await;
        repos
            .bookings()
            .save(booking("BK-X", 101, date(2024, 2, 1), date(2024, 2, 5)))
            .await
            .unwrap();

        let free = service
            .available_rooms(date(2024, 2, 3), date(2024, 2, 6), None)
            .await
            .unwrap();
        let nos: Vec<i32> = free.iter().map(|r| r.room_no).collect();
        assert_eq!(nos, vec![102]);
    }

    #[tokio::test]
    async fn back_to_back_stay_is_allowed() {
        let (service, repos) = setup().await;
        repos
            .bookings()
            .save(booking("BK-X", 101, date(2024, 2, 1), date(2024, 2, 5)))
            .await
            .unwrap();

        // Starts exactly on the other stay's check-out day
        let free = service
            .available_rooms(date(2024, 2, 5), date(2024, 2, 7), None)
            .await
            .unwrap();
        assert!(free.iter().any(|r| r.room_no == 101));
    }

    #[tokio::test]
    async fn cancelled_booking_frees_room_immediately() {
        let (service, repos) = setup().await;
        let mut b = booking("BK-X", 101, date(2024, 2, 1), date(2024, 2, 5));
        repos.bookings().save(b.clone()).await.unwrap();

        b.cancelled = true;
        repos.bookings().update(b).await.unwrap();

        let free = service
            .available_rooms(date(2024, 2, 3), date(2024, 2, 6), None)
            .await
            .unwrap();
        assert!(free.iter().any(|r| r.room_no == 101));
    }

    #[tokio::test]
    async fn maintenance_room_is_never_available() {
        let (service, repos) = setup().await;
        let mut r = repos.rooms().find_by_no(101).await.unwrap().unwrap();
        r.status = RoomStatus::UnderMaintenance;
        repos.rooms().update(r).await.unwrap();

        let free = service
            .available_rooms(date(2024, 2, 1), date(2024, 2, 2), None)
            .await
            .unwrap();
        assert!(!free.iter().any(|r| r.room_no == 101));
    }

    #[tokio::test]
    async fn exclude_skips_own_booking() {
        let (service, repos) = setup().await;
        repos
            .bookings()
            .save(booking("BK-X", 101, date(2024, 2, 1), date(2024, 2, 5)))
            .await
            .unwrap();

        let unavailable = service
            .unavailable_rooms(&[101], date(2024, 2, 1), date(2024, 2, 5), Some("BK-X"))
            .await
            .unwrap();
        assert!(unavailable.is_empty());
    }

    #[tokio::test]
    async fn rejects_inverted_date_range() {
        let (service, _repos) = setup().await;
        let err = service
            .available_rooms(date(2024, 2, 5), date(2024, 2, 5), None)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }
}
