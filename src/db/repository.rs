//! Repository traits for data access abstraction.
//!
//! These traits define the contract for data access, allowing different
//! storage backends to be swapped without changing business logic.
//! Identity scoping is explicit: operations that are scoped to a user
//! take the resolved subject id as a parameter.

use async_trait::async_trait;

use crate::db::{
    DbResult,
    models::{
        BreakingVehicle, BreakingVehicleWithCar, Car, Task, TaskDetail, UserProfile, WeightEntry,
    },
};

/// Repository for Car operations.
#[async_trait]
pub trait CarRepository: Send + Sync {
    /// Create a new car.
    async fn create(&self, car: &Car) -> DbResult<Car>;

    /// Get a car by its unique registration.
    async fn get_by_reg(&self, reg: &str) -> DbResult<Car>;

    /// Get all cars.
    async fn list(&self) -> DbResult<Vec<Car>>;

    /// Partially update a car's paint code, keyed by registration.
    /// `None` clears the paint code.
    async fn update_paint_code(&self, reg: &str, paint_code: Option<&str>) -> DbResult<Car>;
}

/// Repository for BreakingVehicle operations.
#[async_trait]
pub trait BreakingVehicleRepository: Send + Sync {
    /// Mark a car as breaking.
    async fn create(&self, vehicle: &BreakingVehicle) -> DbResult<BreakingVehicle>;

    /// Get all breaking vehicles, each joined with its car.
    async fn list_with_cars(&self) -> DbResult<Vec<BreakingVehicleWithCar>>;
}

/// Repository for Task and TaskDetail operations.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Create a new task.
    async fn create(&self, task: &Task) -> DbResult<Task>;

    /// Get all tasks.
    async fn list(&self) -> DbResult<Vec<Task>>;

    /// Create a task detail.
    async fn create_detail(&self, detail: &TaskDetail) -> DbResult<TaskDetail>;

    /// Look up a task detail by its unique name. `None` means no such
    /// name exists; errors are reserved for store faults.
    async fn get_detail_by_name(&self, name: &str) -> DbResult<Option<TaskDetail>>;
}

/// Repository for UserProfile operations.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Create a new user profile.
    async fn create(&self, user: &UserProfile) -> DbResult<UserProfile>;

    /// Find the profile whose external identity matches the given
    /// subject id.
    async fn find_by_clerk_id(&self, clerk_id: &str) -> DbResult<Option<UserProfile>>;
}

/// Repository for WeightEntry operations.
#[async_trait]
pub trait WeightRepository: Send + Sync {
    /// Record a weight entry.
    async fn create(&self, entry: &WeightEntry) -> DbResult<WeightEntry>;

    /// Get the latest entry by recorded_at, newest first.
    async fn latest(&self) -> DbResult<Option<WeightEntry>>;
}

/// Combined database interface.
#[async_trait]
pub trait Database: Send + Sync {
    /// Run pending migrations.
    async fn migrate(&self) -> DbResult<()>;

    /// Get the car repository.
    fn cars(&self) -> &dyn CarRepository;

    /// Get the breaking vehicle repository.
    fn breaking_vehicles(&self) -> &dyn BreakingVehicleRepository;

    /// Get the task repository.
    fn tasks(&self) -> &dyn TaskRepository;

    /// Get the user repository.
    fn users(&self) -> &dyn UserRepository;

    /// Get the weight repository.
    fn weights(&self) -> &dyn WeightRepository;
}
