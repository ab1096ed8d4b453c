//! First-run bootstrap data.
//!
//! Every entry point is guarded by a `count == 0` check, so all of them are
//! idempotent and safe to call on every app start.

use chrono::Utc;
use trb_core::sea_service::SeaServiceRole;
use trb_core::session::CadetSession;
use trb_core::stream::CadetStream;
use trb_core::task_status::TaskStatus;
use trb_core::vessel::VesselType;

use crate::models::deployment::CreateDeployment;
use crate::models::training_task::CreateTaskTemplate;
use crate::models::vessel::CreateVessel;
use crate::repositories::{DeploymentRepo, TaskRepo, VesselRepo};
use crate::{DbError, DbPool};

struct TemplateDef {
    id: &'static str,
    section_code: &'static str,
    title: &'static str,
    description: &'static str,
    stream: CadetStream,
    is_mandatory: bool,
}

/// The canonical task catalogue, one set per stream.
///
/// Ids are stable slugs so progress rows keep their template link across
/// reinstalls that re-run seeding against a restored database.
const DEFAULT_TEMPLATES: &[TemplateDef] = &[
    // -- Deck --
    TemplateDef {
        id: "tpl-deck-nav-01",
        section_code: "NAV",
        title: "Keep a safe navigational watch",
        description: "Assist the officer of the watch and demonstrate the ability to keep a safe navigational watch under supervision.",
        stream: CadetStream::Deck,
        is_mandatory: true,
    },
    TemplateDef {
        id: "tpl-deck-nav-02",
        section_code: "NAV",
        title: "Fix the ship's position",
        description: "Fix the ship's position by visual bearings, radar ranges and electronic means, and plot it on the chart in use.",
        stream: CadetStream::Deck,
        is_mandatory: true,
    },
    TemplateDef {
        id: "tpl-deck-nav-03",
        section_code: "NAV",
        title: "Apply chart and publication corrections",
        description: "Correct charts and nautical publications from Notices to Mariners and record the corrections applied.",
        stream: CadetStream::Deck,
        is_mandatory: false,
    },
    TemplateDef {
        id: "tpl-deck-cargo-01",
        section_code: "CARGO",
        title: "Assist at cargo operations",
        description: "Take part in loading or discharging operations, including tallying, draft reading and ballast watch duties.",
        stream: CadetStream::Deck,
        is_mandatory: true,
    },
    TemplateDef {
        id: "tpl-deck-cargo-02",
        section_code: "CARGO",
        title: "Rig and inspect cargo gear",
        description: "Rig derricks or cranes for cargo work and carry out a pre-use inspection of wires, blocks and shackles.",
        stream: CadetStream::Deck,
        is_mandatory: false,
    },
    TemplateDef {
        id: "tpl-deck-safety-01",
        section_code: "SAFETY",
        title: "Take part in a fire drill",
        description: "Carry out an assigned role in a shipboard fire drill, including donning a fireman's outfit and breathing apparatus.",
        stream: CadetStream::Deck,
        is_mandatory: true,
    },
    TemplateDef {
        id: "tpl-deck-life-01",
        section_code: "LIFE",
        title: "Launch and recover a lifeboat",
        description: "Assist in the launching and recovery of a lifeboat or rescue boat, acting as a member of the boat's crew.",
        stream: CadetStream::Deck,
        is_mandatory: true,
    },
    // -- Engine --
    TemplateDef {
        id: "tpl-eng-eng-01",
        section_code: "ENG",
        title: "Keep a safe engineering watch",
        description: "Assist the engineer officer of the watch and demonstrate the routines of a safe engine-room watch.",
        stream: CadetStream::Engine,
        is_mandatory: true,
    },
    TemplateDef {
        id: "tpl-eng-eng-02",
        section_code: "ENG",
        title: "Prepare main engine for sea",
        description: "Take part in preparing the main propulsion plant for departure, including pre-start checks and warm-through.",
        stream: CadetStream::Engine,
        is_mandatory: true,
    },
    TemplateDef {
        id: "tpl-eng-eng-03",
        section_code: "ENG",
        title: "Overhaul a purifier",
        description: "Assist in stripping, cleaning and reassembling a fuel or lube oil purifier, and restore it to service.",
        stream: CadetStream::Engine,
        is_mandatory: false,
    },
    TemplateDef {
        id: "tpl-eng-elec-01",
        section_code: "ELEC",
        title: "Parallel generators",
        description: "Under supervision, synchronize and parallel a generator onto the main switchboard and share load.",
        stream: CadetStream::Engine,
        is_mandatory: true,
    },
    TemplateDef {
        id: "tpl-eng-safety-01",
        section_code: "SAFETY",
        title: "Take part in an engine-room fire drill",
        description: "Carry out an assigned role in an engine-room fire scenario, including use of fixed fire-fighting arrangements.",
        stream: CadetStream::Engine,
        is_mandatory: true,
    },
    TemplateDef {
        id: "tpl-eng-life-01",
        section_code: "LIFE",
        title: "Operate lifeboat engine",
        description: "Start, run and stop a lifeboat engine, and check its fuel, cooling and starting arrangements.",
        stream: CadetStream::Engine,
        is_mandatory: true,
    },
    // -- ETO --
    TemplateDef {
        id: "tpl-eto-elec-01",
        section_code: "ELEC",
        title: "Maintain main switchboard",
        description: "Assist in the inspection and maintenance of the main switchboard, observing safe isolation procedures.",
        stream: CadetStream::Eto,
        is_mandatory: true,
    },
    TemplateDef {
        id: "tpl-eto-elec-02",
        section_code: "ELEC",
        title: "Test alarm and shutdown systems",
        description: "Carry out routine tests of machinery alarm, monitoring and shutdown systems and record the results.",
        stream: CadetStream::Eto,
        is_mandatory: true,
    },
    TemplateDef {
        id: "tpl-eto-electronics-01",
        section_code: "ELECTRONICS",
        title: "Maintain navigation electronics",
        description: "Assist in the routine maintenance of radar, GPS and gyro installations, including performance checks.",
        stream: CadetStream::Eto,
        is_mandatory: true,
    },
    TemplateDef {
        id: "tpl-eto-electronics-02",
        section_code: "ELECTRONICS",
        title: "Service internal communication systems",
        description: "Inspect and service internal telephone, public address and talkback systems.",
        stream: CadetStream::Eto,
        is_mandatory: false,
    },
    TemplateDef {
        id: "tpl-eto-safety-01",
        section_code: "SAFETY",
        title: "Isolate electrical equipment for work",
        description: "Apply lock-out/tag-out to electrical equipment before maintenance and prove it dead before work starts.",
        stream: CadetStream::Eto,
        is_mandatory: true,
    },
    TemplateDef {
        id: "tpl-eto-life-01",
        section_code: "LIFE",
        title: "Maintain survival craft batteries",
        description: "Inspect, test and charge lifeboat and GMDSS reserve batteries, and record their condition.",
        stream: CadetStream::Eto,
        is_mandatory: true,
    },
];

/// Seed the default task catalogue on first run.
///
/// Returns the number of templates inserted, or 0 when the catalogue already
/// exists.
pub async fn ensure_default_task_templates_seeded(pool: &DbPool) -> Result<u64, DbError> {
    if TaskRepo::count_templates(pool).await? > 0 {
        return Ok(0);
    }

    for def in DEFAULT_TEMPLATES {
        TaskRepo::insert_template(
            pool,
            &CreateTaskTemplate {
                id: def.id.to_string(),
                section_code: def.section_code.to_string(),
                title: def.title.to_string(),
                description: def.description.to_string(),
                stream: def.stream,
                is_mandatory: def.is_mandatory,
            },
        )
        .await?;
    }

    tracing::info!(count = DEFAULT_TEMPLATES.len(), "seeded default task templates");
    Ok(DEFAULT_TEMPLATES.len() as u64)
}

/// Seed one PENDING progress row per template in the cadet's stream.
///
/// Returns the number of rows inserted, or 0 when the cadet already has any
/// progress rows.
pub async fn ensure_progress_rows_seeded(
    pool: &DbPool,
    session: &CadetSession,
) -> Result<u64, DbError> {
    let existing: (i64,) =
        sqlx::query_as("SELECT COUNT(*) FROM training_task_progress WHERE cadet_id = ?1")
            .bind(&session.cadet_id)
            .fetch_one(pool)
            .await?;
    if existing.0 > 0 {
        return Ok(0);
    }

    let templates = TaskRepo::list_templates_for_stream(pool, session.stream).await?;
    for template in &templates {
        TaskRepo::insert_progress_row(
            pool,
            &session.cadet_id,
            &template.id,
            TaskStatus::Pending,
            None,
        )
        .await?;
    }

    tracing::info!(
        cadet_id = %session.cadet_id,
        count = templates.len(),
        "seeded task progress rows"
    );
    Ok(templates.len() as u64)
}

/// Seed one sample vessel and an open deployment for first-run demo data.
///
/// Returns whether anything was inserted; false when any vessel already
/// exists.
pub async fn ensure_sample_vessel_and_deployment(
    pool: &DbPool,
    cadet_id: &str,
) -> Result<bool, DbError> {
    let vessels: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM vessel")
        .fetch_one(pool)
        .await?;
    if vessels.0 > 0 {
        return Ok(false);
    }

    let vessel = VesselRepo::insert(
        pool,
        &CreateVessel {
            name: "MV Coral Meridian".to_string(),
            imo_number: Some("9731234".to_string()),
            call_sign: Some("9V7021".to_string()),
            flag_state: Some("Singapore".to_string()),
            vessel_type: Some(VesselType::Tanker),
            gross_tonnage: Some(81_000.0),
            length_overall_m: Some(333.0),
            design_draft_m: Some(22.5),
            main_engine_model: Some("MAN B&W 6S60ME-C".to_string()),
            main_engine_power_kw: Some(18_500.0),
            generator_details: Some("3 x 1,250 kW diesel generators".to_string()),
            boiler_type: Some("Composite auxiliary boiler".to_string()),
            nav_equipment_summary: Some("X/S-band radar, ECDIS, GPS, gyro, echo sounder".to_string()),
        },
    )
    .await?;

    DeploymentRepo::sign_on(
        pool,
        &CreateDeployment {
            cadet_id: cadet_id.to_string(),
            vessel_id: vessel.id,
            role: SeaServiceRole::Cadet,
            sign_on_date: Utc::now().date_naive().format("%Y-%m-%d").to_string(),
            sign_off_date: None,
            sign_on_port: Some("Singapore".to_string()),
            voyage_summary: Some("Singapore – Fujairah – Rotterdam".to_string()),
        },
    )
    .await?;

    tracing::info!(cadet_id = %cadet_id, "seeded sample vessel and deployment");
    Ok(true)
}
