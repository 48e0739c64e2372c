pub use super::appointment::Entity as Appointment;
pub use super::doctor_availability::Entity as DoctorAvailability;
pub use super::doctor_profile::Entity as DoctorProfile;
pub use super::feedback::Entity as Feedback;
pub use super::medical_history::Entity as MedicalHistory;
pub use super::medicine_reminder::Entity as MedicineReminder;
pub use super::prescription::Entity as Prescription;
pub use super::prescription_medicine::Entity as PrescriptionMedicine;
pub use super::user::Entity as User;
