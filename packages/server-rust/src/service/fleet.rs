//! Vehicle catalog service: filtering, aggregation, and update orchestration.
//!
//! Defines [`VehicleService`], the seam the HTTP handlers call through, and
//! [`FleetService`], its implementation over a [`VehicleStore`]. Every read
//! operation works on a fresh snapshot from the store; partial updates write
//! back through the store's upsert.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use motorpool_core::Vehicle;
use tracing::debug;

use super::error::ServiceError;
use crate::storage::VehicleStore;

/// Result mapping of a scan or filter, keyed by vehicle identifier.
pub type VehicleMap = HashMap<i32, Vehicle>;

/// Catalog operations exposed to the transport layer.
///
/// Filters return the exact subset of stored vehicles satisfying their
/// predicate and fail with [`ServiceError::NotFound`] when that subset is
/// empty. Used as `Arc<dyn VehicleService>`.
#[async_trait]
pub trait VehicleService: Send + Sync {
    /// Returns a snapshot of every stored vehicle.
    async fn find_all(&self) -> Result<VehicleMap, ServiceError>;

    /// Inserts a single vehicle.
    async fn create(&self, vehicle: Vehicle) -> Result<(), ServiceError>;

    /// Inserts vehicles sequentially. Not atomic: stops at the first
    /// identifier collision, leaving prior inserts committed.
    async fn create_batch(&self, vehicles: Vec<Vehicle>) -> Result<(), ServiceError>;

    /// Vehicles matching `color` exactly and fabricated in `year`.
    ///
    /// The year is parsed leniently: an unparseable string becomes 0 and
    /// matches only vehicles whose recorded year is literally 0.
    async fn by_color_year(&self, color: &str, year: &str) -> Result<VehicleMap, ServiceError>;

    /// Vehicles of `brand` fabricated within the inclusive
    /// `[start_year, end_year]` range. Both bounds parse leniently, like
    /// [`by_color_year`](VehicleService::by_color_year).
    async fn by_brand_year_range(
        &self,
        brand: &str,
        start_year: &str,
        end_year: &str,
    ) -> Result<VehicleMap, ServiceError>;

    /// Vehicles whose fuel type matches exactly.
    async fn by_fuel_type(&self, fuel_type: &str) -> Result<VehicleMap, ServiceError>;

    /// Vehicles whose transmission matches exactly.
    async fn by_transmission(&self, transmission: &str) -> Result<VehicleMap, ServiceError>;

    /// Vehicles whose weight lies within the inclusive `[min, max]` range.
    async fn by_weight_range(&self, min: f64, max: f64) -> Result<VehicleMap, ServiceError>;

    /// Vehicles whose dimensions lie within the given inclusive bounds.
    ///
    /// Compatibility: the length bounds are applied to the recorded
    /// `height` field; the width bounds to `width`.
    async fn by_dimension_range(
        &self,
        min_length: f64,
        max_length: f64,
        min_width: f64,
        max_width: f64,
    ) -> Result<VehicleMap, ServiceError>;

    /// Arithmetic mean of `max_speed` over all vehicles of `brand`.
    async fn average_speed_by_brand(&self, brand: &str) -> Result<f64, ServiceError>;

    /// Integer-truncating mean of passenger capacity over all vehicles of
    /// `brand`.
    async fn average_capacity_by_brand(&self, brand: &str) -> Result<i32, ServiceError>;

    /// Replaces the maximum speed of the vehicle stored under `id`.
    ///
    /// Read-modify-write across two store calls; a concurrent writer to the
    /// same id between the read and the write-back is silently overwritten.
    async fn update_speed(&self, id: i32, new_speed: f64) -> Result<(), ServiceError>;

    /// Replaces the fuel type of the vehicle stored under `id`.
    ///
    /// Same read-modify-write window as
    /// [`update_speed`](VehicleService::update_speed).
    async fn update_fuel_type(&self, id: i32, fuel_type: &str) -> Result<(), ServiceError>;

    /// Removes the vehicle stored under `id`.
    async fn delete(&self, id: i32) -> Result<(), ServiceError>;
}

/// Default [`VehicleService`] over a shared [`VehicleStore`].
pub struct FleetService {
    store: Arc<dyn VehicleStore>,
}

impl FleetService {
    /// Creates a service over the given store.
    #[must_use]
    pub fn new(store: Arc<dyn VehicleStore>) -> Self {
        Self { store }
    }

    /// Snapshots the store and keeps the entries satisfying `predicate`.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::NotFound`] when nothing matches.
    fn filter<P>(&self, predicate: P) -> Result<VehicleMap, ServiceError>
    where
        P: Fn(&Vehicle) -> bool,
    {
        let mut vehicles = self.store.find_all();
        vehicles.retain(|_, v| predicate(v));

        if vehicles.is_empty() {
            return Err(ServiceError::NotFound);
        }
        Ok(vehicles)
    }
}

/// Lenient year parsing: anything unparseable collapses to 0.
fn parse_year(year: &str) -> i32 {
    year.parse().unwrap_or(0)
}

#[async_trait]
impl VehicleService for FleetService {
    async fn find_all(&self) -> Result<VehicleMap, ServiceError> {
        Ok(self.store.find_all())
    }

    async fn create(&self, vehicle: Vehicle) -> Result<(), ServiceError> {
        let id = vehicle.id;
        self.store.create(vehicle)?;
        debug!(id, "vehicle created");
        Ok(())
    }

    async fn create_batch(&self, vehicles: Vec<Vehicle>) -> Result<(), ServiceError> {
        // Sequential, no rollback: a collision aborts the remainder but
        // keeps everything inserted so far.
        for vehicle in vehicles {
            let id = vehicle.id;
            self.store.create(vehicle)?;
            debug!(id, "vehicle created");
        }
        Ok(())
    }

    async fn by_color_year(&self, color: &str, year: &str) -> Result<VehicleMap, ServiceError> {
        let year = parse_year(year);
        self.filter(|v| v.color == color && v.fabrication_year == year)
    }

    async fn by_brand_year_range(
        &self,
        brand: &str,
        start_year: &str,
        end_year: &str,
    ) -> Result<VehicleMap, ServiceError> {
        let start = parse_year(start_year);
        let end = parse_year(end_year);
        self.filter(|v| {
            v.brand == brand && v.fabrication_year >= start && v.fabrication_year <= end
        })
    }

    async fn by_fuel_type(&self, fuel_type: &str) -> Result<VehicleMap, ServiceError> {
        self.filter(|v| v.fuel_type == fuel_type)
    }

    async fn by_transmission(&self, transmission: &str) -> Result<VehicleMap, ServiceError> {
        self.filter(|v| v.transmission == transmission)
    }

    async fn by_weight_range(&self, min: f64, max: f64) -> Result<VehicleMap, ServiceError> {
        self.filter(|v| v.weight >= min && v.weight <= max)
    }

    async fn by_dimension_range(
        &self,
        min_length: f64,
        max_length: f64,
        min_width: f64,
        max_width: f64,
    ) -> Result<VehicleMap, ServiceError> {
        // Compatibility: length bounds are matched against the height field.
        self.filter(|v| {
            v.dimensions.height >= min_length
                && v.dimensions.height <= max_length
                && v.dimensions.width >= min_width
                && v.dimensions.width <= max_width
        })
    }

    async fn average_speed_by_brand(&self, brand: &str) -> Result<f64, ServiceError> {
        let vehicles = self.store.find_all();

        let mut total = 0.0;
        let mut count: u32 = 0;
        for v in vehicles.values().filter(|v| v.brand == brand) {
            total += v.max_speed;
            count += 1;
        }

        if count == 0 {
            return Err(ServiceError::NotFound);
        }
        Ok(total / f64::from(count))
    }

    async fn average_capacity_by_brand(&self, brand: &str) -> Result<i32, ServiceError> {
        let vehicles = self.store.find_all();

        let mut total: i32 = 0;
        let mut count: i32 = 0;
        for v in vehicles.values().filter(|v| v.brand == brand) {
            total += v.capacity;
            count += 1;
        }

        if count == 0 {
            return Err(ServiceError::NotFound);
        }
        Ok(total / count)
    }

    async fn update_speed(&self, id: i32, new_speed: f64) -> Result<(), ServiceError> {
        let mut vehicle = self.store.find_one(id)?;
        vehicle.max_speed = new_speed;
        self.store.update(id, vehicle);
        debug!(id, new_speed, "vehicle speed updated");
        Ok(())
    }

    async fn update_fuel_type(&self, id: i32, fuel_type: &str) -> Result<(), ServiceError> {
        let mut vehicle = self.store.find_one(id)?;
        vehicle.fuel_type = fuel_type.to_string();
        self.store.update(id, vehicle);
        debug!(id, fuel_type, "vehicle fuel type updated");
        Ok(())
    }

    async fn delete(&self, id: i32) -> Result<(), ServiceError> {
        self.store.delete(id)?;
        debug!(id, "vehicle deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use motorpool_core::Dimensions;
    use proptest::prelude::*;

    fn vehicle(id: i32) -> Vehicle {
        Vehicle {
            id,
            brand: "Toyota".to_string(),
            model: "Corolla".to_string(),
            registration: format!("REG-{id}"),
            color: "red".to_string(),
            fabrication_year: 2020,
            capacity: 5,
            max_speed: 180.0,
            fuel_type: "gasoline".to_string(),
            transmission: "manual".to_string(),
            weight: 1300.0,
            dimensions: Dimensions {
                height: 1.5,
                length: 4.6,
                width: 1.8,
            },
        }
    }

    fn service(vehicles: Vec<Vehicle>) -> FleetService {
        FleetService::new(Arc::new(MemoryStore::with_vehicles(vehicles)))
    }

    #[tokio::test]
    async fn by_color_year_returns_exact_subset() {
        let mut blue = vehicle(2);
        blue.color = "blue".to_string();
        let sv = service(vec![vehicle(1), blue]);

        let matches = sv.by_color_year("red", "2020").await.expect("matches");

        assert_eq!(matches.len(), 1);
        assert!(matches.contains_key(&1));
    }

    #[tokio::test]
    async fn by_color_year_empty_result_is_not_found() {
        let sv = service(vec![vehicle(1)]);

        assert_eq!(
            sv.by_color_year("green", "2020").await,
            Err(ServiceError::NotFound)
        );
    }

    #[tokio::test]
    async fn unparseable_year_matches_literal_year_zero() {
        let mut unregistered = vehicle(2);
        unregistered.fabrication_year = 0;
        let sv = service(vec![vehicle(1), unregistered]);

        let matches = sv.by_color_year("red", "not-a-year").await.expect("matches");

        assert_eq!(matches.len(), 1);
        assert!(matches.contains_key(&2));
    }

    #[tokio::test]
    async fn by_brand_year_range_bounds_are_inclusive() {
        let mut early = vehicle(1);
        early.fabrication_year = 2010;
        let mut late = vehicle(2);
        late.fabrication_year = 2015;
        let mut outside = vehicle(3);
        outside.fabrication_year = 2016;
        let sv = service(vec![early, late, outside]);

        let matches = sv
            .by_brand_year_range("Toyota", "2010", "2015")
            .await
            .expect("matches");

        assert_eq!(matches.len(), 2);
        assert!(matches.contains_key(&1));
        assert!(matches.contains_key(&2));
    }

    #[tokio::test]
    async fn by_brand_year_range_wrong_brand_is_not_found() {
        let sv = service(vec![vehicle(1)]);

        assert_eq!(
            sv.by_brand_year_range("Ford", "2000", "2030").await,
            Err(ServiceError::NotFound)
        );
    }

    #[tokio::test]
    async fn by_fuel_type_exact_match() {
        let mut diesel = vehicle(2);
        diesel.fuel_type = "diesel".to_string();
        let sv = service(vec![vehicle(1), diesel]);

        let matches = sv.by_fuel_type("diesel").await.expect("matches");

        assert_eq!(matches.len(), 1);
        assert!(matches.contains_key(&2));
    }

    #[tokio::test]
    async fn by_transmission_exact_match() {
        let mut automatic = vehicle(2);
        automatic.transmission = "automatic".to_string();
        let sv = service(vec![vehicle(1), automatic]);

        let matches = sv.by_transmission("manual").await.expect("matches");

        assert_eq!(matches.len(), 1);
        assert!(matches.contains_key(&1));
    }

    #[tokio::test]
    async fn by_weight_range_is_inclusive() {
        let mut light = vehicle(1);
        light.weight = 1000.0;
        let mut heavy = vehicle(2);
        heavy.weight = 2000.0;
        let sv = service(vec![light, heavy]);

        let matches = sv.by_weight_range(1000.0, 1500.0).await.expect("matches");

        assert_eq!(matches.len(), 1);
        assert!(matches.contains_key(&1));
    }

    #[tokio::test]
    async fn by_dimension_range_pairs_length_bounds_with_height() {
        // Height inside the length bounds, length far outside: still a match.
        let mut v = vehicle(1);
        v.dimensions = Dimensions {
            height: 2.0,
            length: 10.0,
            width: 1.5,
        };
        let sv = service(vec![v]);

        let matches = sv
            .by_dimension_range(1.0, 3.0, 1.0, 2.0)
            .await
            .expect("matches");
        assert!(matches.contains_key(&1));

        // Height outside the length bounds: no match, even though the
        // recorded length would fit.
        assert_eq!(
            sv.by_dimension_range(9.0, 11.0, 1.0, 2.0).await,
            Err(ServiceError::NotFound)
        );
    }

    #[tokio::test]
    async fn average_speed_is_arithmetic_mean() {
        let mut slow = vehicle(1);
        slow.max_speed = 100.0;
        let mut fast = vehicle(2);
        fast.max_speed = 200.0;
        let sv = service(vec![slow, fast]);

        let avg = sv.average_speed_by_brand("Toyota").await.expect("average");
        assert!((avg - 150.0).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn average_speed_unknown_brand_is_not_found() {
        let sv = service(vec![vehicle(1)]);

        assert_eq!(
            sv.average_speed_by_brand("Ford").await,
            Err(ServiceError::NotFound)
        );
    }

    #[tokio::test]
    async fn average_capacity_truncates_toward_zero() {
        let mut five = vehicle(1);
        five.capacity = 5;
        let mut four = vehicle(2);
        four.capacity = 4;
        let sv = service(vec![five, four]);

        // (5 + 4) / 2 == 4 in integer arithmetic.
        assert_eq!(sv.average_capacity_by_brand("Toyota").await, Ok(4));
    }

    #[tokio::test]
    async fn create_batch_commits_prefix_before_duplicate() {
        let store = Arc::new(MemoryStore::new());
        store.create(vehicle(2)).expect("seed");
        let sv = FleetService::new(Arc::clone(&store) as Arc<dyn VehicleStore>);

        let result = sv
            .create_batch(vec![vehicle(1), vehicle(2), vehicle(3)])
            .await;

        assert_eq!(result, Err(ServiceError::AlreadyExists));
        // v1 stays committed, v3 was never attempted.
        assert!(store.find_one(1).is_ok());
        assert!(store.find_one(3).is_err());
    }

    #[tokio::test]
    async fn update_speed_changes_only_max_speed() {
        let store = Arc::new(MemoryStore::with_vehicles(vec![vehicle(1)]));
        let sv = FleetService::new(Arc::clone(&store) as Arc<dyn VehicleStore>);

        sv.update_speed(1, 220.0).await.expect("update");

        let mut expected = vehicle(1);
        expected.max_speed = 220.0;
        assert_eq!(store.find_one(1), Ok(expected));
    }

    #[tokio::test]
    async fn update_speed_absent_id_is_not_found() {
        let sv = service(vec![]);

        assert_eq!(sv.update_speed(9, 220.0).await, Err(ServiceError::NotFound));
    }

    #[tokio::test]
    async fn update_fuel_type_changes_only_fuel_type() {
        let store = Arc::new(MemoryStore::with_vehicles(vec![vehicle(1)]));
        let sv = FleetService::new(Arc::clone(&store) as Arc<dyn VehicleStore>);

        sv.update_fuel_type(1, "electric").await.expect("update");

        let mut expected = vehicle(1);
        expected.fuel_type = "electric".to_string();
        assert_eq!(store.find_one(1), Ok(expected));
    }

    #[tokio::test]
    async fn delete_propagates_not_found() {
        let sv = service(vec![vehicle(1)]);

        assert!(sv.delete(1).await.is_ok());
        assert_eq!(sv.delete(1).await, Err(ServiceError::NotFound));
    }

    #[tokio::test]
    async fn find_all_on_empty_store_is_empty_success() {
        // Unlike the filters, a full scan of an empty store succeeds.
        let sv = service(vec![]);

        assert_eq!(sv.find_all().await, Ok(VehicleMap::new()));
    }

    proptest! {
        #[test]
        fn weight_filter_returns_exactly_the_matching_subset(
            weights in proptest::collection::vec(0.0f64..3000.0, 1..20),
            min in 0.0f64..3000.0,
            span in 0.0f64..1500.0,
        ) {
            let max = min + span;
            let vehicles: Vec<Vehicle> = weights
                .iter()
                .enumerate()
                .map(|(i, &w)| {
                    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
                    let mut v = vehicle(i as i32);
                    v.weight = w;
                    v
                })
                .collect();
            let expected: Vec<i32> = vehicles
                .iter()
                .filter(|v| v.weight >= min && v.weight <= max)
                .map(|v| v.id)
                .collect();

            let sv = service(vehicles);
            let rt = tokio::runtime::Builder::new_current_thread()
                .build()
                .expect("runtime");
            let result = rt.block_on(sv.by_weight_range(min, max));

            match result {
                Ok(map) => {
                    let mut got: Vec<i32> = map.into_keys().collect();
                    let mut want = expected.clone();
                    got.sort_unstable();
                    want.sort_unstable();
                    prop_assert_eq!(got, want);
                }
                Err(ServiceError::NotFound) => prop_assert!(expected.is_empty()),
                Err(other) => prop_assert!(false, "unexpected error: {other}"),
            }
        }
    }
}
