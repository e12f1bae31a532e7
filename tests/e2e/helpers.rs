use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

pub const MIT: &str = "MIT License

Permission is hereby granted, free of charge, to any person obtaining a copy
of this software and associated documentation files (the \"Software\")";

pub const BSD3: &str = "Redistribution and use in source and binary forms, with or without
modification, are permitted provided that the following conditions are met:
Neither the name of the copyright holder nor the names of its contributors
may be used to endorse or promote products derived from this software.";

pub const GPL3: &str = "GNU GENERAL PUBLIC LICENSE
Version 3, 29 June 2007";

pub struct TestProject {
    pub dir: TempDir,
    pub binary_path: String,
}

impl TestProject {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let binary_path = env!("CARGO_BIN_EXE_vendor-license-auditor").to_string();

        Self { dir, binary_path }
    }

    /// A project importing two vendored packages: `github.com/fake/package`
    /// with its own BSD-3-Clause license, and a nested package that only has
    /// an MIT license further up its path.
    pub fn fake() -> Self {
        let project = Self::new();
        project.write(
            "main.go",
            "package main\n\nimport (\n\t\"fmt\"\n\t\"github.com/fake/package\"\n\t\"github.com/fake/nested/inside/a/package\"\n)\n\nfunc main() { fmt.Println() }\n",
        );
        project.write("vendor/github.com/fake/package/mockpkg.go", "package mockpkg\n");
        project.write("vendor/github.com/fake/package/LICENSE", BSD3);
        project.write("vendor/github.com/fake/nested/LICENSE", MIT);
        project.write("vendor/github.com/fake/nested/inside/a/package/mockpkg.go", "package mockpkg\n");
        project
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn file(&self, rel: &str) -> PathBuf {
        self.dir.path().join(rel)
    }

    pub fn write(&self, rel: &str, content: &str) {
        let path = self.file(rel);
        fs::create_dir_all(path.parent().expect("path has a parent")).expect("Failed to create dirs");
        fs::write(path, content).expect("Failed to write file");
    }

    pub fn read(&self, rel: &str) -> String {
        fs::read_to_string(self.file(rel)).expect("Failed to read file")
    }

    pub fn run_auditor(&self, args: &[&str]) -> Output {
        Command::new(&self.binary_path)
            .args(args)
            .current_dir(self.path())
            .env_remove("RUST_LOG")
            .output()
            .expect("Failed to run vendor-license-auditor")
    }
}

pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}
