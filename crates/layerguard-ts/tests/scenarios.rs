//! End-to-end scenarios over trees built in temporary directories.

use std::fs;
use std::path::Path;

use layerguard_core::{Report, ViolationCode};
use layerguard_ts::{AnalyzeError, AnalyzeOptions, Analyzer};
use tempfile::TempDir;

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn analyze(root: &Path) -> Report {
    Analyzer::new(root, AnalyzeOptions::default())
        .run()
        .expect("analysis should succeed")
}

fn codes(report: &Report) -> Vec<ViolationCode> {
    report.iter().map(|v| v.code).collect()
}

#[test]
fn application_importing_infrastructure() {
    let tmp = TempDir::new().unwrap();
    let src = tmp.path().join("src");
    write(
        &src,
        "domain/IWidgetRepository.ts",
        "export interface IWidgetRepository {\n  find(id: string): Promise<unknown>;\n}\n",
    );
    write(
        &src,
        "application/WidgetService.ts",
        "import { IWidgetRepository } from '../domain/IWidgetRepository';\nimport { WidgetDb } from '../infrastructure/WidgetDb';\n\nexport class WidgetService {\n  constructor(private repo: IWidgetRepository, private db: WidgetDb) {}\n}\n",
    );

    let report = analyze(&src);
    assert_eq!(report.errors.len(), 1, "{:?}", report.errors);
    let v = &report.errors[0];
    assert_eq!(v.code, ViolationCode::LayerViolation);
    assert_eq!(v.file, "application/WidgetService.ts");
    assert_eq!(v.line, Some(2));
}

#[test]
fn helper_with_two_any_annotations() {
    let tmp = TempDir::new().unwrap();
    write(
        tmp.path(),
        "utils/helper.ts",
        "export function pick(obj: any, key: any): unknown {\n  return obj[key];\n}\n",
    );

    let report = analyze(tmp.path());
    assert!(report.errors.is_empty());
    assert!(report.info.is_empty());
    assert_eq!(codes(&report), vec![ViolationCode::AnyType]);
    assert_eq!(report.warnings[0].line, None);
    assert!(report.warnings[0].message.contains('2'));
}

#[test]
fn missing_source_root_is_fatal() {
    let err = Analyzer::new("/does/not/exist", AnalyzeOptions::default())
        .run()
        .unwrap_err();
    assert!(matches!(err, AnalyzeError::SourceRootNotFound { .. }));
    assert!(err.to_string().contains("/does/not/exist"));
}

#[test]
fn infrastructure_may_depend_inward() {
    let tmp = TempDir::new().unwrap();
    write(
        tmp.path(),
        "infrastructure/http/WidgetController.ts",
        "import { WidgetService } from '../../application/WidgetService';\nimport { Widget } from '../../domain/Widget';\n\nexport class WidgetController {\n  constructor(private service: WidgetService) {}\n}\n",
    );

    let report = analyze(tmp.path());
    assert!(!codes(&report).contains(&ViolationCode::LayerViolation));
}

#[test]
fn domain_importing_outward_is_flagged_per_import() {
    let tmp = TempDir::new().unwrap();
    write(
        tmp.path(),
        "domain/Widget.ts",
        "import { A } from '../application/A';\nimport { B } from '../infrastructure/B';\nimport { C } from './C';\nimport lodash from 'lodash';\n\nexport class Widget {}\n",
    );

    let report = analyze(tmp.path());
    let lines: Vec<Option<usize>> = report
        .errors
        .iter()
        .filter(|v| v.code == ViolationCode::LayerViolation)
        .map(|v| v.line)
        .collect();
    assert_eq!(lines, vec![Some(1), Some(2)]);
}

#[test]
fn repository_class_in_domain_is_one_location_error() {
    let tmp = TempDir::new().unwrap();
    write(
        tmp.path(),
        "domain/WidgetRepository.ts",
        "export class WidgetRepository {\n  constructor() {}\n}\n",
    );

    let report = analyze(tmp.path());
    let location_errors = report
        .errors
        .iter()
        .filter(|v| v.code == ViolationCode::RepositoryLocation)
        .count();
    assert_eq!(location_errors, 1);
}

#[test]
fn nested_class_is_checked() {
    let tmp = TempDir::new().unwrap();
    write(
        tmp.path(),
        "application/factory.ts",
        "export function build() {\n  class AuditService {\n    log() {}\n  }\n  return new AuditService();\n}\n",
    );

    let report = analyze(tmp.path());
    assert_eq!(codes(&report), vec![ViolationCode::ServiceDi]);
    assert_eq!(report.warnings[0].line, Some(2));
}

#[test]
fn parse_failure_does_not_stop_the_run() {
    let tmp = TempDir::new().unwrap();
    write(tmp.path(), "domain/Broken.ts", "export class {{{\n");
    write(
        tmp.path(),
        "domain/User.ts",
        "import { Db } from '../infrastructure/Db';\nexport class User {}\n",
    );

    let report = analyze(tmp.path());
    assert_eq!(
        codes(&report),
        vec![ViolationCode::ParseError, ViolationCode::LayerViolation]
    );
    assert_eq!(report.errors[0].file, "domain/Broken.ts");
    assert_eq!(report.stats.files_scanned, 2);
}

#[test]
fn empty_tree_is_clean() {
    let tmp = TempDir::new().unwrap();
    let report = analyze(tmp.path());
    assert_eq!(report.stats.files_scanned, 0);
    assert_eq!(report.stats.total_violations, 0);
    assert!(!report.has_errors());
}

#[test]
fn separate_analyzers_do_not_share_state() {
    let a = TempDir::new().unwrap();
    let b = TempDir::new().unwrap();
    write(a.path(), "utils/x.ts", "let v: any;\n");
    write(b.path(), "utils/y.ts", "let v: string;\n");

    let first = analyze(a.path());
    let second = analyze(b.path());
    assert_eq!(first.stats.total_violations, 1);
    assert_eq!(second.stats.total_violations, 0);
}
