pub mod collection;
pub mod document_academy_repo;
pub mod document_appointment_repo;
pub mod document_availability_repo;
