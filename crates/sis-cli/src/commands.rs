//! Command implementations over a snapshot-backed registry.

use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use sis_core::{CreateStudent, StudentService, UpdateStudent};
use sis_model::CohortCodes;
use sis_store::{MemoryStore, load_snapshot, save_snapshot};

use crate::cli::{CreateArgs, ExportArgs, GetArgs, ImportArgs, ListArgs, UpdateArgs};
use crate::summary::{print_import_summary, print_student, print_students};

fn open_service(registry: &Path) -> Result<StudentService<MemoryStore>> {
    let records = load_snapshot(registry)
        .with_context(|| format!("load registry {}", registry.display()))?;
    let store = MemoryStore::with_records(records).context("registry violates uniqueness")?;
    Ok(StudentService::new(store))
}

fn persist(service: &StudentService<MemoryStore>, registry: &Path) -> Result<()> {
    let records = service.list().context("read records for snapshot")?;
    save_snapshot(registry, &records)
        .with_context(|| format!("save registry {}", registry.display()))
}

pub fn run_create(registry: &Path, args: &CreateArgs) -> Result<i32> {
    let service = open_service(registry)?;
    let cohort = CohortCodes::new(&args.faculty, &args.level, &args.program, &args.year)
        .context("invalid cohort codes")?;
    let record = service
        .create(&CreateStudent {
            cohort,
            first_name: args.first_name.clone(),
            last_name: args.last_name.clone(),
            date_of_birth: args.dob,
        })
        .context("create student")?;
    persist(&service, registry)?;
    print_student(&record);
    Ok(0)
}

pub fn run_list(registry: &Path, args: &ListArgs) -> Result<i32> {
    let service = open_service(registry)?;
    let records = service.list().context("list students")?;
    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&records).context("serialize records")?
        );
    } else {
        print_students(&records);
    }
    Ok(0)
}

pub fn run_get(registry: &Path, args: &GetArgs) -> Result<i32> {
    let service = open_service(registry)?;
    match service.get(&args.id).context("look up student")? {
        Some(record) => {
            print_student(&record);
            Ok(0)
        }
        None => {
            eprintln!("student not found: {}", args.id);
            Ok(1)
        }
    }
}

pub fn run_update(registry: &Path, args: &UpdateArgs) -> Result<i32> {
    let service = open_service(registry)?;
    let updated = service
        .update(
            &args.id,
            &UpdateStudent {
                first_name: args.first_name.clone(),
                last_name: args.last_name.clone(),
                date_of_birth: args.dob,
            },
        )
        .context("update student")?;
    match updated {
        Some(record) => {
            persist(&service, registry)?;
            print_student(&record);
            Ok(0)
        }
        None => {
            eprintln!("student not found: {}", args.id);
            Ok(1)
        }
    }
}

pub fn run_delete(registry: &Path, args: &GetArgs) -> Result<i32> {
    let service = open_service(registry)?;
    if service.delete(&args.id).context("delete student")? {
        persist(&service, registry)?;
        println!("deleted {}", args.id);
        Ok(0)
    } else {
        eprintln!("student not found: {}", args.id);
        Ok(1)
    }
}

pub fn run_import(registry: &Path, args: &ImportArgs) -> Result<i32> {
    let service = open_service(registry)?;
    let file = File::open(&args.file)
        .with_context(|| format!("open import file {}", args.file.display()))?;
    let outcome = service.import(file).context("import CSV")?;
    if !outcome.accepted.is_empty() {
        persist(&service, registry)?;
    }
    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&outcome).context("serialize outcome")?
        );
    } else {
        print_import_summary(&outcome);
    }
    if outcome.is_clean() || args.lenient {
        Ok(0)
    } else {
        Ok(1)
    }
}

pub fn run_export(registry: &Path, args: &ExportArgs) -> Result<i32> {
    let service = open_service(registry)?;
    let export = service.export().context("render export")?;
    let output = args
        .output
        .clone()
        .unwrap_or_else(|| export.file_name.clone().into());
    std::fs::write(&output, &export.bytes)
        .with_context(|| format!("write export {}", output.display()))?;
    info!(path = %output.display(), bytes = export.bytes.len(), "wrote export");
    println!("{}", output.display());
    Ok(0)
}
