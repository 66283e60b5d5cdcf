//! Ecosystem detection and task generation.
//!
//! Inspects a project tree for marker files and emits a default task list
//! for whatever it finds. Detection is an ordered first-match rule list: a
//! directory gets exactly one ecosystem, so a `Makefile` sitting next to
//! `go.mod` still means a Go project. A tree with no markers anywhere falls
//! back to a generic placeholder at the root, so generation always emits
//! something.

use std::fmt;
use std::fs;
use std::path::Path;

use crate::config::Task;

/// Directories never scanned for subprojects.
const SKIP_DIRS: [&str; 8] = [
    "node_modules",
    "target",
    "build",
    "dist",
    "out",
    "vendor",
    "__pycache__",
    "venv",
];

/// Project ecosystems the generator knows how to verify.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Ecosystem {
    Node,
    Python,
    Go,
    Rust,
    DotNet,
    JavaMaven,
    Scala,
    Kotlin,
    JavaGradle,
    Swift,
    Cpp,
    Dart,
    Ruby,
    Php,
    Make,
    /// Fallback when no rule matches; never claimed by the marker scan.
    Generic,
}

impl fmt::Display for Ecosystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Ecosystem::Node => "Node.js",
            Ecosystem::Python => "Python",
            Ecosystem::Go => "Go",
            Ecosystem::Rust => "Rust",
            Ecosystem::DotNet => ".NET",
            Ecosystem::JavaMaven => "Java (Maven)",
            Ecosystem::Scala => "Scala",
            Ecosystem::Kotlin => "Kotlin",
            Ecosystem::JavaGradle => "Java (Gradle)",
            Ecosystem::Swift => "Swift",
            Ecosystem::Cpp => "C/C++",
            Ecosystem::Dart => "Dart",
            Ecosystem::Ruby => "Ruby",
            Ecosystem::Php => "PHP",
            Ecosystem::Make => "Make",
            Ecosystem::Generic => "Generic",
        };
        write!(f, "{label}")
    }
}

impl Ecosystem {
    /// Rule order is significant; earlier rules claim a directory first.
    const DETECTION_ORDER: [Ecosystem; 15] = [
        Ecosystem::Node,
        Ecosystem::Python,
        Ecosystem::Go,
        Ecosystem::Rust,
        Ecosystem::DotNet,
        Ecosystem::JavaMaven,
        Ecosystem::Scala,
        Ecosystem::Kotlin,
        Ecosystem::JavaGradle,
        Ecosystem::Swift,
        Ecosystem::Cpp,
        Ecosystem::Dart,
        Ecosystem::Ruby,
        Ecosystem::Php,
        Ecosystem::Make,
    ];

    fn matches(&self, dir: &Path) -> bool {
        match self {
            Ecosystem::Node => dir.join("package.json").exists(),
            Ecosystem::Python => {
                dir.join("pyproject.toml").exists() || dir.join("requirements.txt").exists()
            }
            Ecosystem::Go => dir.join("go.mod").exists(),
            Ecosystem::Rust => dir.join("Cargo.toml").exists(),
            Ecosystem::DotNet => {
                has_file_with_extension(dir, "csproj") || has_file_with_extension(dir, "fsproj")
            }
            Ecosystem::JavaMaven => dir.join("pom.xml").exists(),
            Ecosystem::Scala => {
                dir.join("build.sbt").exists() || dir.join("src/main/scala").exists()
            }
            Ecosystem::Kotlin => dir.join("src/main/kotlin").exists(),
            Ecosystem::JavaGradle => {
                dir.join("build.gradle").exists() || dir.join("build.gradle.kts").exists()
            }
            Ecosystem::Swift => dir.join("Package.swift").exists(),
            Ecosystem::Cpp => {
                dir.join("CMakeLists.txt").exists()
                    || has_file_with_extension(dir, "cpp")
                    || has_file_with_extension(dir, "cc")
            }
            Ecosystem::Dart => {
                dir.join("pubspec.yaml").exists() || has_file_with_extension(dir, "dart")
            }
            Ecosystem::Ruby => dir.join("Gemfile").exists(),
            Ecosystem::Php => dir.join("composer.json").exists(),
            Ecosystem::Make => dir.join("Makefile").exists(),
            Ecosystem::Generic => false,
        }
    }

    /// Conventional test command, untagged so it gates both commits and
    /// pushes.
    fn test_command(&self) -> &'static str {
        match self {
            Ecosystem::Node => "npm test",
            Ecosystem::Python => "python -m pytest",
            Ecosystem::Go => "go test ./...",
            Ecosystem::Rust => "cargo test",
            Ecosystem::DotNet => "dotnet test",
            Ecosystem::JavaMaven => "mvn -B test",
            Ecosystem::Scala => "sbt test",
            Ecosystem::Kotlin => "./gradlew test",
            Ecosystem::JavaGradle => "./gradlew test",
            Ecosystem::Swift => "swift test",
            Ecosystem::Cpp => {
                "cmake -S . -B build && cmake --build build && ctest --test-dir build --output-on-failure"
            }
            Ecosystem::Dart => "dart test",
            Ecosystem::Ruby => "bundle exec rake test",
            Ecosystem::Php => "composer test",
            Ecosystem::Make => "make test",
            Ecosystem::Generic => "echo 'no checks configured; edit universal-ci.config.json'",
        }
    }

    /// Heavier command reserved for the `release` stage (pre-push), where
    /// one exists for the ecosystem.
    fn release_command(&self) -> Option<&'static str> {
        match self {
            Ecosystem::Node => Some("npm run build --if-present"),
            Ecosystem::Go => Some("go build ./..."),
            Ecosystem::Rust => Some("cargo build --release"),
            Ecosystem::DotNet => Some("dotnet build -c Release"),
            Ecosystem::JavaMaven => Some("mvn -B verify"),
            Ecosystem::Kotlin => Some("./gradlew build"),
            Ecosystem::JavaGradle => Some("./gradlew build"),
            Ecosystem::Swift => Some("swift build -c release"),
            Ecosystem::Make => Some("make"),
            Ecosystem::Python
            | Ecosystem::Scala
            | Ecosystem::Cpp
            | Ecosystem::Dart
            | Ecosystem::Ruby
            | Ecosystem::Php
            | Ecosystem::Generic => None,
        }
    }
}

/// First matching rule for `dir`, or `None` for a directory with no marker
/// files.
pub fn detect_ecosystem(dir: &Path) -> Option<Ecosystem> {
    Ecosystem::DETECTION_ORDER
        .into_iter()
        .find(|ecosystem| ecosystem.matches(dir))
}

/// Detect the project root and its first-level subdirectories.
///
/// Returns `(working_directory, ecosystem)` pairs, root first, subprojects
/// in name order. Hidden directories and build output are not scanned.
/// When no rule matches anywhere, the result is a single
/// [`Ecosystem::Generic`] entry at the root rather than an empty list.
pub fn scan_project(root: &Path) -> Vec<(String, Ecosystem)> {
    let mut found = Vec::new();

    if let Some(ecosystem) = detect_ecosystem(root) {
        found.push((".".to_string(), ecosystem));
    }

    let mut subdirs: Vec<String> = match fs::read_dir(root) {
        Ok(entries) => entries
            .flatten()
            .filter(|entry| entry.path().is_dir())
            .filter_map(|entry| entry.file_name().to_str().map(str::to_string))
            .filter(|name| !name.starts_with('.') && !SKIP_DIRS.contains(&name.as_str()))
            .collect(),
        Err(_) => Vec::new(),
    };
    subdirs.sort();

    for name in subdirs {
        if let Some(ecosystem) = detect_ecosystem(&root.join(&name)) {
            found.push((name, ecosystem));
        }
    }

    if found.is_empty() {
        found.push((".".to_string(), Ecosystem::Generic));
    }

    found
}

/// Default task list for everything detected under `root`. Never empty:
/// an unrecognized tree gets one generic placeholder task to edit.
pub fn generate_tasks(root: &Path) -> Vec<Task> {
    tasks_for(&scan_project(root))
}

/// Default tasks for an already-scanned project: a test task per detection,
/// plus a `release`-staged build task where the ecosystem has one.
pub fn tasks_for(found: &[(String, Ecosystem)]) -> Vec<Task> {
    let mut tasks = Vec::new();

    for (working_directory, ecosystem) in found {
        tasks.push(Task {
            name: task_name(*ecosystem, "tests", working_directory),
            working_directory: working_directory.clone(),
            command: ecosystem.test_command().to_string(),
            stage: None,
        });

        if let Some(command) = ecosystem.release_command() {
            tasks.push(Task {
                name: task_name(*ecosystem, "release build", working_directory),
                working_directory: working_directory.clone(),
                command: command.to_string(),
                stage: Some("release".to_string()),
            });
        }
    }

    tasks
}

fn task_name(ecosystem: Ecosystem, kind: &str, working_directory: &str) -> String {
    if working_directory == "." {
        format!("{ecosystem} {kind}")
    } else {
        format!("{ecosystem} {kind} ({working_directory})")
    }
}

fn has_file_with_extension(dir: &Path, extension: &str) -> bool {
    match fs::read_dir(dir) {
        Ok(entries) => entries.flatten().any(|entry| {
            entry.path().extension().and_then(|ext| ext.to_str()) == Some(extension)
        }),
        Err(_) => false,
    }
}
