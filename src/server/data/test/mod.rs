mod appointment;
mod doctor;
mod feedback;
mod medical_history;
mod prescription;
mod reminder;
mod user;
