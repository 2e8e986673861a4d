//! Session type, room and teaching assignment resolution during generation.

use presensi_db::db::enums::AttendanceStatus;
use presensi_db::model::schedule::ScheduleRule;
use presensi_db::model::teaching::TeachingAssignment;
use presensi_service::error::ServiceError;
use presensi_service::generator::{GenerateOptions, generate_occurrences};
use uuid::Uuid;

use super::helpers::*;

// ============================================================================
// Session types
// ============================================================================

/// ## Summary
/// The tenant's default session type is created on first use and reused afterwards.
#[test_log::test(tokio::test)]
async fn default_session_type_is_created_once() {
    let mut fx = Fixture::new();
    let first = fx.seed_schedule(date(2025, 1, 6), date(2025, 1, 31));
    let second = fx.seed_schedule(date(2025, 2, 3), date(2025, 2, 28));
    fx.seed_monday_rule(&first);
    fx.seed_monday_rule(&second);

    for schedule_id in [first.id, second.id] {
        generate_occurrences(
            &mut fx.store,
            &config(),
            schedule_id,
            &GenerateOptions::default(),
        )
        .await
        .unwrap();
    }

    let types = fx.store.session_types();
    assert_eq!(types.len(), 1);
    assert_eq!(types[0].slug, "regular");
    assert_eq!(types[0].name, "Regular Session");
    assert!(types[0].is_live());
    assert_eq!(types[0].required_reason_states, vec!["excused", "sick"]);

    let sessions = fx.store.sessions();
    assert_eq!(sessions.len(), 8);
    assert!(sessions.iter().all(|s| s.session_type_id == Some(types[0].id)));
    let snapshot = sessions[0].session_type_snapshot.as_ref().unwrap();
    assert_eq!(snapshot["name"], "Regular Session");
    assert_eq!(snapshot["attendance_window_mode"], "schedule");
    assert_eq!(snapshot["attendance_open_offset_minutes"], -15);
    assert_eq!(snapshot["attendance_close_offset_minutes"], 30);
    assert_eq!(snapshot["allow_self_attendance"], false);
}

/// ## Summary
/// Losing the creation race for the default type re-reads the winner's row.
#[test_log::test(tokio::test)]
async fn default_session_type_race_is_tolerated() {
    let mut fx = Fixture::new();
    let schedule = fx.seed_schedule(date(2025, 1, 6), date(2025, 1, 31));
    fx.seed_monday_rule(&schedule);
    fx.store.race_next_insert();

    let created = generate_occurrences(
        &mut fx.store,
        &config(),
        schedule.id,
        &GenerateOptions::default(),
    )
    .await
    .unwrap();

    assert_eq!(created, 4);
    let types = fx.store.session_types();
    assert_eq!(types.len(), 1);
    assert!(
        fx.store
            .sessions()
            .iter()
            .all(|s| s.session_type_id == Some(types[0].id))
    );
}

/// ## Summary
/// An explicit session type is attached and no default type is created.
#[test_log::test(tokio::test)]
async fn explicit_session_type_is_used() {
    let mut fx = Fixture::new();
    let exam = fx.seed_session_type("ujian", true);
    let schedule = fx.seed_schedule(date(2025, 1, 6), date(2025, 1, 31));
    fx.seed_monday_rule(&schedule);
    let options = GenerateOptions {
        default_session_type_id: Some(exam.id),
        ..GenerateOptions::default()
    };

    generate_occurrences(&mut fx.store, &config(), schedule.id, &options)
        .await
        .unwrap();

    assert_eq!(fx.store.session_types().len(), 1);
    for session in fx.store.sessions() {
        assert_eq!(session.session_type_id, Some(exam.id));
        let snapshot = session.session_type_snapshot.as_ref().unwrap();
        assert_eq!(snapshot["slug"], "ujian");
        assert_eq!(snapshot["attendance_window_mode"], "manual");
    }
}

/// ## Summary
/// Missing, foreign and inactive session types abort the run.
#[test_log::test(tokio::test)]
async fn unusable_session_type_is_rejected() {
    let mut fx = Fixture::new();
    let schedule = fx.seed_schedule(date(2025, 1, 6), date(2025, 1, 31));
    fx.seed_monday_rule(&schedule);
    let inactive = fx.seed_session_type("lama", false);
    let foreign = fx.seed_session_type("asing", true);
    fx.store.session_type_mut(foreign.id).unwrap().tenant_id = Uuid::new_v4();

    let cases = [
        (Uuid::new_v4(), "not found"),
        (foreign.id, "tenant"),
        (inactive.id, "inactive"),
    ];
    for (id, case) in cases {
        let options = GenerateOptions {
            default_session_type_id: Some(id),
            ..GenerateOptions::default()
        };
        let err = generate_occurrences(&mut fx.store, &config(), schedule.id, &options)
            .await
            .unwrap_err();
        match case {
            "not found" => assert!(matches!(err, ServiceError::NotFound(_))),
            "tenant" => assert!(matches!(err, ServiceError::TenantMismatch(_))),
            _ => assert!(matches!(err, ServiceError::ValidationError(_))),
        }
    }
    assert!(fx.store.sessions().is_empty());
}

/// ## Summary
/// Editing a session type after generation leaves existing snapshots untouched.
#[test_log::test(tokio::test)]
async fn snapshot_survives_session_type_edit() {
    let mut fx = Fixture::new();
    let mut schedule = fx.seed_schedule(date(2025, 1, 6), date(2025, 1, 19));
    fx.seed_monday_rule(&schedule);
    generate_occurrences(
        &mut fx.store,
        &config(),
        schedule.id,
        &GenerateOptions::default(),
    )
    .await
    .unwrap();

    let type_id = fx.store.session_types()[0].id;
    let edited = fx.store.session_type_mut(type_id).unwrap();
    edited.name = "Kelas Reguler".to_string();
    edited.attendance_close_offset_minutes = 60;

    schedule.end_date = date(2025, 1, 31);
    fx.update_schedule(&schedule);
    generate_occurrences(
        &mut fx.store,
        &config(),
        schedule.id,
        &GenerateOptions::default(),
    )
    .await
    .unwrap();

    let names: Vec<_> = fx
        .store
        .live_sessions_for(schedule.id)
        .iter()
        .map(|s| s.session_type_snapshot.as_ref().unwrap()["name"].clone())
        .collect();
    assert_eq!(
        names,
        vec![
            "Regular Session",
            "Regular Session",
            "Kelas Reguler",
            "Kelas Reguler"
        ]
    );
}

// ============================================================================
// Rooms
// ============================================================================

/// ## Summary
/// The assignment's own room beats its section's room.
#[test_log::test(tokio::test)]
async fn assignment_room_beats_section_room() {
    let mut fx = Fixture::new();
    let lab = fx.seed_room("Lab Komputer");
    let homeroom = fx.seed_room("Ruang 7A");
    let section = fx.seed_section("7A", Some(homeroom.id));
    let with_room = fx.seed_assignment("Informatika 7A", Some(lab.id), Some(section.id));
    let without_room = fx.seed_assignment("Matematika 7A", None, Some(section.id));
    let schedule = fx.seed_schedule(date(2025, 1, 6), date(2025, 1, 12));
    fx.seed_rule(ScheduleRule {
        csst_id: Some(with_room.id),
        ..weekly_rule(&schedule, 1, time(8, 0), time(9, 30))
    });
    fx.seed_rule(ScheduleRule {
        csst_id: Some(without_room.id),
        ..weekly_rule(&schedule, 2, time(8, 0), time(9, 30))
    });

    generate_occurrences(
        &mut fx.store,
        &config(),
        schedule.id,
        &GenerateOptions::default(),
    )
    .await
    .unwrap();

    let rooms: Vec<_> = fx
        .store
        .live_sessions_for(schedule.id)
        .iter()
        .map(|s| s.room_id)
        .collect();
    assert_eq!(rooms, vec![Some(lab.id), Some(homeroom.id)]);
    assert_eq!(fx.store.rooms().len(), 2);
}

/// ## Summary
/// A section without a room gets one provisioned, and later runs reuse it.
#[test_log::test(tokio::test)]
async fn section_room_is_provisioned_once() {
    let mut fx = Fixture::new();
    let section = fx.seed_section("8B", None);
    let assignment = fx.seed_assignment("Biologi 8B", None, Some(section.id));
    let first = fx.seed_schedule(date(2025, 1, 6), date(2025, 1, 31));
    let second = fx.seed_schedule(date(2025, 2, 3), date(2025, 2, 28));
    for schedule in [&first, &second] {
        fx.seed_rule(ScheduleRule {
            csst_id: Some(assignment.id),
            ..weekly_rule(schedule, 1, time(8, 0), time(9, 30))
        });
    }

    for schedule_id in [first.id, second.id] {
        generate_occurrences(
            &mut fx.store,
            &config(),
            schedule_id,
            &GenerateOptions::default(),
        )
        .await
        .unwrap();
    }

    let rooms = fx.store.rooms();
    assert_eq!(rooms.len(), 1);
    assert_eq!(rooms[0].slug, format!("section-{}-room", section.id));
    assert_eq!(rooms[0].section_id, Some(section.id));
    assert_eq!(rooms[0].tenant_id, fx.tenant_id);
    assert!(
        fx.store
            .sessions()
            .iter()
            .all(|s| s.room_id == Some(rooms[0].id))
    );
}

/// ## Summary
/// Losing the room creation race re-reads the room created by the other run.
#[test_log::test(tokio::test)]
async fn section_room_race_is_tolerated() {
    let mut fx = Fixture::new();
    let section = fx.seed_section("9C", None);
    let assignment = fx.seed_assignment("Kimia 9C", None, Some(section.id));
    let schedule = fx.seed_schedule(date(2025, 1, 6), date(2025, 1, 31));
    fx.seed_monday_rule(&schedule);
    fx.store.race_next_insert();
    let options = GenerateOptions {
        default_csst_id: Some(assignment.id),
        ..GenerateOptions::default()
    };

    let created = generate_occurrences(&mut fx.store, &config(), schedule.id, &options)
        .await
        .unwrap();

    assert_eq!(created, 4);
    let rooms = fx.store.rooms();
    assert_eq!(rooms.len(), 1);
    assert!(
        fx.store
            .sessions()
            .iter()
            .all(|s| s.room_id == Some(rooms[0].id))
    );
}

/// ## Summary
/// An explicit room wins and no room is provisioned.
#[test_log::test(tokio::test)]
async fn explicit_room_skips_provisioning() {
    let mut fx = Fixture::new();
    let section = fx.seed_section("8B", None);
    let assignment = fx.seed_assignment("Biologi 8B", None, Some(section.id));
    let schedule = fx.seed_schedule(date(2025, 1, 6), date(2025, 1, 31));
    fx.seed_monday_rule(&schedule);
    let hall = Uuid::new_v4();
    let options = GenerateOptions {
        default_csst_id: Some(assignment.id),
        default_room_id: Some(hall),
        ..GenerateOptions::default()
    };

    generate_occurrences(&mut fx.store, &config(), schedule.id, &options)
        .await
        .unwrap();

    assert!(fx.store.rooms().is_empty());
    assert!(fx.store.sessions().iter().all(|s| s.room_id == Some(hall)));
}

/// ## Summary
/// An assignment without room or section leaves the room unset.
#[test_log::test(tokio::test)]
async fn assignment_without_section_has_no_room() {
    let mut fx = Fixture::new();
    let assignment = fx.seed_assignment("Olahraga", None, None);
    let schedule = fx.seed_schedule(date(2025, 1, 6), date(2025, 1, 31));
    fx.seed_monday_rule(&schedule);
    let options = GenerateOptions {
        default_csst_id: Some(assignment.id),
        ..GenerateOptions::default()
    };

    generate_occurrences(&mut fx.store, &config(), schedule.id, &options)
        .await
        .unwrap();

    assert!(fx.store.rooms().is_empty());
    assert!(fx.store.sessions().iter().all(|s| s.room_id.is_none()));
    assert!(
        fx.store
            .sessions()
            .iter()
            .all(|s| s.teacher_id == assignment.teacher_id)
    );
}

// ============================================================================
// Teaching assignments
// ============================================================================

/// ## Summary
/// Title and slug come from the assignment; an assignment slug beats the derived one.
#[test_log::test(tokio::test)]
async fn title_and_slug_come_from_assignment() {
    let mut fx = Fixture::new();
    let assignment = TeachingAssignment {
        slug: Some("mtk-7a".to_string()),
        ..fx.seed_assignment("Matematika 7A", None, None)
    };
    fx.store.add_teaching_assignment(assignment.clone());
    let schedule = fx.seed_schedule(date(2025, 1, 6), date(2025, 1, 12));
    fx.seed_monday_rule(&schedule);
    let options = GenerateOptions {
        default_csst_id: Some(assignment.id),
        ..GenerateOptions::default()
    };

    generate_occurrences(&mut fx.store, &config(), schedule.id, &options)
        .await
        .unwrap();

    let session = &fx.store.sessions()[0];
    assert_eq!(session.title.as_deref(), Some("Matematika 7A"));
    assert_eq!(session.slug.as_deref(), Some("mtk-7a-pertemuan-1"));
    assert_eq!(session.csst_id, Some(assignment.id));
}

/// ## Summary
/// Caller defaults win over everything resolved from the assignment.
#[test_log::test(tokio::test)]
async fn explicit_defaults_win() {
    let mut fx = Fixture::new();
    let assignment = fx.seed_assignment("Matematika 7A", None, None);
    let schedule = fx.seed_schedule(date(2025, 1, 6), date(2025, 1, 31));
    fx.seed_monday_rule(&schedule);
    let substitute = Uuid::new_v4();
    let options = GenerateOptions {
        default_csst_id: Some(assignment.id),
        default_teacher_id: Some(substitute),
        default_title: Some("Remedial".to_string()),
        default_attendance_status: Some(AttendanceStatus::Closed),
        ..GenerateOptions::default()
    };

    generate_occurrences(&mut fx.store, &config(), schedule.id, &options)
        .await
        .unwrap();

    for session in fx.store.sessions() {
        assert_eq!(session.teacher_id, Some(substitute));
        assert_eq!(session.title.as_deref(), Some("Remedial"));
        assert_eq!(session.attendance_status, AttendanceStatus::Closed);
        assert!(session.slug.as_deref().unwrap().starts_with("matematika-7a-pertemuan-"));
    }
}

/// ## Summary
/// The schedule's own assignment is the default, and a caller-supplied one replaces it.
#[test_log::test(tokio::test)]
async fn schedule_assignment_is_the_default() {
    let mut fx = Fixture::new();
    let own = fx.seed_assignment("Sejarah 7A", None, None);
    let other = fx.seed_assignment("Geografi 7A", None, None);
    let mut schedule = fx.seed_schedule(date(2025, 1, 6), date(2025, 1, 12));
    schedule.csst_id = Some(own.id);
    fx.update_schedule(&schedule);
    fx.seed_monday_rule(&schedule);

    let rows = presensi_service::generator::preview_occurrences(
        &mut fx.store,
        &config(),
        schedule.id,
        &GenerateOptions::default(),
    )
    .await
    .unwrap();
    assert_eq!(rows[0].csst_id, Some(own.id));

    let options = GenerateOptions {
        default_csst_id: Some(other.id),
        ..GenerateOptions::default()
    };
    let rows = presensi_service::generator::preview_occurrences(
        &mut fx.store,
        &config(),
        schedule.id,
        &options,
    )
    .await
    .unwrap();
    assert_eq!(rows[0].csst_id, Some(other.id));
    assert_eq!(rows[0].title.as_deref(), Some("Geografi 7A"));
}

/// ## Summary
/// An unusable default assignment aborts the run.
#[test_log::test(tokio::test)]
async fn unusable_default_assignment_is_rejected() {
    let mut fx = Fixture::new();
    let schedule = fx.seed_schedule(date(2025, 1, 6), date(2025, 1, 31));
    fx.seed_monday_rule(&schedule);
    let foreign = TeachingAssignment {
        tenant_id: Uuid::new_v4(),
        ..fx.seed_assignment("Asing", None, None)
    };
    fx.store.add_teaching_assignment(foreign.clone());
    let broken = fx.seed_assignment("Rusak", None, None);
    fx.store.fail_assignment_loads(broken.id);

    let run = |csst_id| GenerateOptions {
        default_csst_id: Some(csst_id),
        ..GenerateOptions::default()
    };

    let err = generate_occurrences(&mut fx.store, &config(), schedule.id, &run(Uuid::new_v4()))
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(_)));

    let err = generate_occurrences(&mut fx.store, &config(), schedule.id, &run(foreign.id))
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::TenantMismatch(_)));

    let err = generate_occurrences(&mut fx.store, &config(), schedule.id, &run(broken.id))
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::DatabaseError(_)));

    assert!(fx.store.sessions().is_empty());
}

/// ## Summary
/// A rule whose assignment cannot be resolved still produces sessions, unassigned.
#[test_log::test(tokio::test)]
async fn unresolvable_rule_assignment_is_tolerated() {
    let mut fx = Fixture::new();
    let broken = fx.seed_assignment("Rusak", None, None);
    fx.store.fail_assignment_loads(broken.id);
    let foreign = TeachingAssignment {
        tenant_id: Uuid::new_v4(),
        ..fx.seed_assignment("Asing", None, None)
    };
    fx.store.add_teaching_assignment(foreign.clone());
    let schedule = fx.seed_schedule(date(2025, 1, 6), date(2025, 1, 12));
    fx.seed_rule(ScheduleRule {
        csst_id: Some(broken.id),
        ..weekly_rule(&schedule, 1, time(8, 0), time(9, 30))
    });
    fx.seed_rule(ScheduleRule {
        csst_id: Some(foreign.id),
        ..weekly_rule(&schedule, 2, time(8, 0), time(9, 30))
    });
    let teacher = Uuid::new_v4();
    let options = GenerateOptions {
        default_teacher_id: Some(teacher),
        ..GenerateOptions::default()
    };

    let created = generate_occurrences(&mut fx.store, &config(), schedule.id, &options)
        .await
        .unwrap();

    assert_eq!(created, 2);
    for session in fx.store.sessions() {
        assert_eq!(session.csst_id, None);
        assert_eq!(session.meeting_number, None);
        assert_eq!(session.room_id, None);
        assert_eq!(session.title, None);
        assert_eq!(session.teacher_id, Some(teacher));
    }
}
