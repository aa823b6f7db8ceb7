// tests/workflow_test.rs
use aver::cli::{run_list, run_set, ListReport, ListWorkflowArgs, RunContext, SetWorkflowArgs};
use aver::config::Config;
use aver::domain::SemanticVersion;
use aver::AverError;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const ASSEMBLY_INFO: &str = "using System.Reflection;\n[assembly: AssemblyVersion(\"1.0.0.0\")]\n";
const NUSPEC: &str = "<package>\n  <metadata>\n    <version>0.0.0</version>\n  </metadata>\n</package>\n";

fn write(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

/// root/{version.txt, Lib/{Lib.csproj, Lib.nuspec, Properties/AssemblyInfo.cs}, App/{version.txt, App.csproj, ...}}
fn sample_tree() -> TempDir {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    write(&root.join("version.txt"), "1.4.0-beta\n");
    write(&root.join("Lib/Lib.csproj"), "");
    write(&root.join("Lib/Lib.nuspec"), NUSPEC);
    write(&root.join("Lib/Properties/AssemblyInfo.cs"), ASSEMBLY_INFO);
    write(&root.join("App/version.txt"), "2.0.0");
    write(&root.join("App/App.csproj"), "");
    write(&root.join("App/Properties/AssemblyInfo.cs"), ASSEMBLY_INFO);
    temp
}

fn set_args(root: &Path) -> SetWorkflowArgs {
    SetWorkflowArgs {
        location: root.to_path_buf(),
        recurse: true,
        ..SetWorkflowArgs::default()
    }
}

#[test]
fn test_set_writes_declared_versions() {
    let temp = sample_tree();
    let config = Config::default();

    let report = run_set(&set_args(temp.path()), RunContext::new(&config)).unwrap();

    assert_eq!(report.projects.len(), 2);
    assert_eq!(report.files_written, 3);
    assert!(report.failures.is_empty());
    assert_eq!(
        report.root_version.as_ref().map(|v| v.full_version()),
        Some("1.4.0-beta".to_string())
    );

    let lib_info = fs::read_to_string(temp.path().join("Lib/Properties/AssemblyInfo.cs")).unwrap();
    assert!(lib_info.contains("//[assembly: AssemblyVersion(\"1.0.0.0\")]"));
    assert!(lib_info.contains("[assembly: AssemblyVersion(\"1.4.0.0\")]"));
    assert!(lib_info.contains("[assembly: AssemblyInformationalVersion(\"1.4.0-beta\")]"));

    let app_info = fs::read_to_string(temp.path().join("App/Properties/AssemblyInfo.cs")).unwrap();
    assert!(app_info.contains("[assembly: AssemblyFileVersion(\"2.0.0.0\")]"));

    let nuspec = fs::read_to_string(temp.path().join("Lib/Lib.nuspec")).unwrap();
    assert!(nuspec.contains("<version>1.4.0-beta</version>"));
}

#[test]
fn test_set_override_and_build_metadata() {
    let temp = sample_tree();
    let config = Config::default();
    let args = SetWorkflowArgs {
        version: Some("3.1.0".to_string()),
        build: Some("master.f00beef".to_string()),
        override_declared: true,
        ..set_args(temp.path())
    };

    let report = run_set(&args, RunContext::new(&config)).unwrap();

    for project in &report.projects {
        assert_eq!(project.version.full_version(), "3.1.0+master.f00beef");
    }
    assert_eq!(
        report.build_number.map(|v| v.full_version()),
        Some("3.1.0+master.f00beef".to_string())
    );

    let nuspec = fs::read_to_string(temp.path().join("Lib/Lib.nuspec")).unwrap();
    assert!(nuspec.contains("<version>3.1.0</version>"));
    let info = fs::read_to_string(temp.path().join("App/Properties/AssemblyInfo.cs")).unwrap();
    assert!(info.contains("AssemblyInformationalVersion(\"3.1.0+master.f00beef\")"));
}

#[test]
fn test_set_without_override_keeps_declarations() {
    let temp = sample_tree();
    let config = Config::default();
    let args = SetWorkflowArgs {
        version: Some("9.0.0".to_string()),
        ..set_args(temp.path())
    };

    let report = run_set(&args, RunContext::new(&config)).unwrap();

    let versions: Vec<_> = report.projects.iter().map(|p| p.version.clone()).collect();
    assert!(versions.contains(&SemanticVersion::parse("2.0.0").unwrap()));
    assert!(versions.contains(&SemanticVersion::parse("1.4.0-beta").unwrap()));
}

#[test]
fn test_set_rejects_bad_command_line_version() {
    let temp = sample_tree();
    let config = Config::default();
    let args = SetWorkflowArgs {
        version: Some("1.2-foo".to_string()),
        ..set_args(temp.path())
    };

    let err = run_set(&args, RunContext::new(&config)).unwrap_err();
    assert!(matches!(err, AverError::InvalidFormat(_)));

    let untouched = fs::read_to_string(temp.path().join("Lib/Lib.nuspec")).unwrap();
    assert_eq!(untouched, NUSPEC);
}

#[test]
fn test_set_missing_root() {
    let config = Config::default();
    let err = run_set(&set_args(Path::new("/no/such/root")), RunContext::new(&config)).unwrap_err();
    assert!(matches!(err, AverError::MissingRoot(_)));
}

#[test]
fn test_set_clears_read_only_files() {
    let temp = sample_tree();
    let nuspec = temp.path().join("Lib/Lib.nuspec");
    let mut permissions = fs::metadata(&nuspec).unwrap().permissions();
    permissions.set_readonly(true);
    fs::set_permissions(&nuspec, permissions).unwrap();

    let config = Config::default();
    let report = run_set(&set_args(temp.path()), RunContext::new(&config)).unwrap();

    assert!(report.failures.is_empty());
    assert!(fs::read_to_string(&nuspec).unwrap().contains("<version>1.4.0-beta</version>"));
}

#[test]
fn test_list_projects() {
    let temp = sample_tree();
    let config = Config::default();
    let args = ListWorkflowArgs {
        location: temp.path().to_path_buf(),
        recurse: true,
        binaries: false,
    };

    match run_list(&args, RunContext::new(&config)).unwrap() {
        ListReport::Projects(outcome) => {
            let names: Vec<_> = outcome.projects.iter().map(|p| p.name.as_str()).collect();
            assert_eq!(names, vec!["App", "Lib"]);
        }
        other => panic!("expected projects, got {:?}", other),
    }
}

#[test]
fn test_list_binaries_ignores_non_modules() {
    let temp = sample_tree();
    write(&temp.path().join("bin/Fake.dll"), "not really a dll");
    let config = Config::default();
    let args = ListWorkflowArgs {
        location: temp.path().to_path_buf(),
        recurse: true,
        binaries: true,
    };

    match run_list(&args, RunContext::new(&config)).unwrap() {
        ListReport::Binaries(modules) => assert!(modules.is_empty()),
        other => panic!("expected binaries, got {:?}", other),
    }
}
