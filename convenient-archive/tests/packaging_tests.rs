//! Integration tests for install-tree packaging
//!
//! Packages a scratch install tree through each channel and reads the
//! archives back to compare entry names and contents.

use convenient_archive::{
    package_for_studio, package_install_tree, ArchiveError, PackageChannel, StudioBundle,
    SOURCE_PROPERTIES,
};
use std::collections::BTreeMap;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const PACKAGE: &str = "cmake-linux-3.18.1-1234";

fn install_tree(root: &Path) -> BTreeMap<String, Vec<u8>> {
    let files: [(&str, &[u8]); 5] = [
        ("bin/cmake", b"#!cmake binary"),
        ("bin/ctest", b"#!ctest binary"),
        ("doc/cmake-3.18/Copyright.txt", b"BSD 3-Clause"),
        ("share/cmake-3.18/Modules/FindZLIB.cmake", b"find_path(ZLIB_INCLUDE_DIR zlib.h)"),
        ("share/aclocal/cmake.m4", b"AC_DEFUN"),
    ];

    let mut expected = BTreeMap::new();
    for (name, contents) in files {
        let path = root.join(name);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, contents).unwrap();
        expected.insert(name.to_string(), contents.to_vec());
    }
    fs::create_dir_all(root.join("share/empty-dir")).unwrap();
    expected
}

fn read_zip(path: &Path) -> BTreeMap<String, Vec<u8>> {
    let mut archive = zip::ZipArchive::new(fs::File::open(path).unwrap()).unwrap();
    let mut entries = BTreeMap::new();
    for i in 0..archive.len() {
        let mut entry = archive.by_index(i).unwrap();
        let mut contents = Vec::new();
        entry.read_to_end(&mut contents).unwrap();
        let previous = entries.insert(entry.name().to_string(), contents);
        assert!(previous.is_none(), "duplicate entry {}", entry.name());
    }
    entries
}

fn read_tar_bz2(path: &Path) -> BTreeMap<String, Vec<u8>> {
    let decoder = bzip2::read::BzDecoder::new(fs::File::open(path).unwrap());
    let mut archive = tar::Archive::new(decoder);
    let mut entries = BTreeMap::new();
    for entry in archive.entries().unwrap() {
        let mut entry = entry.unwrap();
        let name = entry.path().unwrap().to_string_lossy().replace('\\', "/");
        let mut contents = Vec::new();
        entry.read_to_end(&mut contents).unwrap();
        let previous = entries.insert(name.clone(), contents);
        assert!(previous.is_none(), "duplicate entry {}", name);
    }
    entries
}

struct StudioFixture {
    _temp: TempDir,
    install: PathBuf,
    dest: PathBuf,
    bundle: StudioBundle,
}

fn studio_fixture() -> StudioFixture {
    let temp = TempDir::new().unwrap();
    let install = temp.path().join("install");
    install_tree(&install);

    let tools = temp.path().join("tools");
    fs::create_dir_all(&tools).unwrap();
    fs::write(tools.join("ninja"), b"ninja binary").unwrap();

    let modules = temp.path().join("android-cmake");
    fs::create_dir_all(&modules).unwrap();
    fs::write(modules.join("AndroidNdkModules.cmake"), b"# ndk modules").unwrap();
    fs::write(modules.join("AndroidNdkGdb.cmake"), b"# ndk gdb").unwrap();

    StudioFixture {
        dest: temp.path().join("dist"),
        install,
        bundle: StudioBundle {
            version: "3.18.1".to_string(),
            accelerator: tools.join("ninja"),
            modules_dir: modules,
        },
        _temp: temp,
    }
}

#[test]
fn test_zip_contains_every_file_flattened() {
    let temp = TempDir::new().unwrap();
    let install = temp.path().join("install");
    let expected = install_tree(&install);
    let dest = temp.path().join("dist/nested");

    let package = package_install_tree(&install, PACKAGE, &dest, PackageChannel::FlatZip).unwrap();

    assert_eq!(package, dest.join(format!("{PACKAGE}.zip")));
    assert_eq!(read_zip(&package), expected);
}

#[test]
fn test_tarball_nests_under_package_name() {
    let temp = TempDir::new().unwrap();
    let install = temp.path().join("install");
    let expected: BTreeMap<_, _> = install_tree(&install)
        .into_iter()
        .map(|(name, contents)| (format!("{PACKAGE}/{name}"), contents))
        .collect();
    let dest = temp.path().join("dist");

    let package =
        package_install_tree(&install, PACKAGE, &dest, PackageChannel::VersionedTarBz2).unwrap();

    assert_eq!(package, dest.join(format!("{PACKAGE}.tar.bz2")));
    assert_eq!(read_tar_bz2(&package), expected);
}

#[test]
fn test_packaging_leaves_install_tree_untouched() {
    let temp = TempDir::new().unwrap();
    let install = temp.path().join("install");
    let expected = install_tree(&install);

    package_install_tree(&install, PACKAGE, temp.path(), PackageChannel::FlatZip).unwrap();

    let after: BTreeMap<_, _> = convenient_archive::collect_install_files(&install)
        .unwrap()
        .into_iter()
        .map(|file| (file.relative, fs::read(file.path).unwrap()))
        .collect();
    assert_eq!(after, expected);
}

#[cfg(unix)]
#[test]
fn test_zip_keeps_executable_bit() {
    use std::os::unix::fs::PermissionsExt;

    let temp = TempDir::new().unwrap();
    let install = temp.path().join("install");
    install_tree(&install);
    fs::set_permissions(install.join("bin/cmake"), fs::Permissions::from_mode(0o755)).unwrap();

    let package =
        package_install_tree(&install, PACKAGE, temp.path(), PackageChannel::FlatZip).unwrap();

    let mut archive = zip::ZipArchive::new(fs::File::open(package).unwrap()).unwrap();
    let entry = archive.by_name("bin/cmake").unwrap();
    assert_eq!(entry.unix_mode().unwrap() & 0o777, 0o755);
}

#[test]
fn test_studio_archive_contents() {
    let fixture = studio_fixture();

    let package =
        package_for_studio(&fixture.install, PACKAGE, &fixture.dest, &fixture.bundle).unwrap();
    assert_eq!(package, fixture.dest.join(format!("{PACKAGE}-for-studio.zip")));

    let entries = read_zip(&package);

    let properties = String::from_utf8(entries[SOURCE_PROPERTIES].clone()).unwrap();
    let lines: Vec<_> = properties.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines.iter().all(|line| line.contains("3.18.1")));

    assert_eq!(entries["bin/ninja"], b"ninja binary");
    assert_eq!(
        entries["share/cmake-3.18/Modules/AndroidNdkModules.cmake"],
        b"# ndk modules"
    );
    assert_eq!(entries["share/cmake-3.18/Modules/AndroidNdkGdb.cmake"], b"# ndk gdb");
    assert_eq!(entries["bin/cmake"], b"#!cmake binary");

    // Five install files plus descriptor, accelerator and two modules
    assert_eq!(entries.len(), 9);
}

#[test]
fn test_studio_missing_module_fails_before_writing() {
    let fixture = studio_fixture();
    fs::remove_file(fixture.bundle.modules_dir.join("AndroidNdkGdb.cmake")).unwrap();

    let result = package_for_studio(&fixture.install, PACKAGE, &fixture.dest, &fixture.bundle);

    match result {
        Err(ArchiveError::MissingArtifact(path)) => {
            assert!(path.ends_with("AndroidNdkGdb.cmake"));
        }
        other => panic!("Expected MissingArtifact, got {:?}", other),
    }
    assert!(!fixture.dest.join(format!("{PACKAGE}-for-studio.zip")).exists());
}

#[test]
fn test_studio_missing_accelerator_fails() {
    let mut fixture = studio_fixture();
    fixture.bundle.accelerator = fixture.install.join("bin/ninja");

    let result = package_for_studio(&fixture.install, PACKAGE, &fixture.dest, &fixture.bundle);
    assert!(matches!(result, Err(ArchiveError::MissingArtifact(_))));
}

#[test]
fn test_studio_requires_single_module_dir() {
    let fixture = studio_fixture();
    fs::create_dir_all(fixture.install.join("share/cmake-3.19")).unwrap();

    let result = package_for_studio(&fixture.install, PACKAGE, &fixture.dest, &fixture.bundle);
    assert!(matches!(
        result,
        Err(ArchiveError::ModuleDirectory { matches: 2, .. })
    ));
}
