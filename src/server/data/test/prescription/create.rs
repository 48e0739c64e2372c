use super::*;

/// Tests writing a prescription with several medicines.
///
/// Expected: Ok with all medicines stored and returned in order
#[tokio::test]
async fn creates_prescription_with_medicines() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_all_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (patient, doctor, appointment) =
        factory::helpers::create_appointment_with_dependencies(db).await?;

    let repo = PrescriptionRepository::new(db);
    let prescription = repo
        .create(CreatePrescriptionParam {
            appointment_id: appointment.id,
            doctor_id: doctor.id,
            patient_id: patient.id,
            diagnosis: "Migraine".to_string(),
            notes: None,
            medicines: vec![medicine("Sumatriptan"), medicine("Ibuprofen")],
        })
        .await?;

    assert_eq!(prescription.diagnosis, "Migraine");
    assert_eq!(prescription.medicines.len(), 2);
    assert!(repo.exists_for_appointment(appointment.id).await?);

    let found = repo.find_by_id(prescription.id).await?.unwrap();
    let names: Vec<&str> = found.medicines.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, vec!["Sumatriptan", "Ibuprofen"]);

    Ok(())
}

/// Tests listing prescriptions for a patient and a doctor.
///
/// Expected: Ok with each prescription carrying its medicines
#[tokio::test]
async fn lists_by_patient_and_doctor() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_all_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (patient, doctor, appointment) =
        factory::helpers::create_appointment_with_dependencies(db).await?;
    factory::prescription::create_prescription(db, &appointment).await?;
    let (_, _, unrelated) = factory::helpers::create_appointment_with_dependencies(db).await?;
    factory::prescription::create_prescription(db, &unrelated).await?;

    let repo = PrescriptionRepository::new(db);

    let for_patient = repo.get_by_patient(patient.id).await?;
    assert_eq!(for_patient.len(), 1);
    assert_eq!(for_patient[0].medicines.len(), 1);
    assert_eq!(for_patient[0].medicines[0].name, "Paracetamol");

    let for_doctor = repo.get_by_doctor(doctor.id).await?;
    assert_eq!(for_doctor.len(), 1);
    assert_eq!(for_doctor[0].appointment_id, appointment.id);

    Ok(())
}
