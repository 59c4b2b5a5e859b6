use async_trait::async_trait;
use mockall::mock;

use crate::{
    errors::AppointmentResult,
    models::{appointment::Appointment, time_range::TimeRange},
    repository::AppointmentRepository,
    service::AppointmentService,
};

// Mock repository for service tests
mock! {
    pub AppointmentRepo {}

    #[async_trait]
    impl AppointmentRepository for AppointmentRepo {
        async fn create(&self, appointment: &Appointment) -> AppointmentResult<()>;

        async fn get_by_trainer(&self, trainer_id: &str) -> AppointmentResult<Vec<Appointment>>;

        async fn get_by_trainer_in_range(
            &self,
            trainer_id: &str,
            range: &TimeRange,
        ) -> AppointmentResult<Vec<Appointment>>;
    }
}

// Mock service for handler tests
mock! {
    pub AppointmentSvc {}

    #[async_trait]
    impl AppointmentService for AppointmentSvc {
        async fn create(&self, appointment: Appointment) -> AppointmentResult<()>;

        async fn find_by_trainer_id(&self, trainer_id: &str) -> AppointmentResult<Vec<Appointment>>;

        async fn find_by_trainer_id_in_range(
            &self,
            trainer_id: &str,
            range: TimeRange,
        ) -> AppointmentResult<Vec<Appointment>>;
    }
}
