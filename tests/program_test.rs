use color_eyre::eyre::{Context, Result};
use std::{
    fs::{read_dir, read_to_string},
    path::Path,
};

use blockrun::{
    interpreter::{
        formatter::{BasicFormatter, JsonFormatter, ReportFormatter},
        Interpreter,
    },
    program::ProgramFile,
};

fn check(input: &str, expected: &str, test_name: &str) {
    let file = ProgramFile::from_json(input)
        .unwrap_or_else(|error| panic!("Malformed program {test_name}: {error}"));
    let interpreter = Interpreter::new(file.config.unwrap_or_default());
    let report = interpreter.run(&file.statements);
    let actual = BasicFormatter.render(&report);

    assert_eq!(actual, expected.trim_end(), "Failed the test {test_name}");
}

#[test]
fn smoke_test() {
    check(r#"{ "statements": [] }"#, "", "smoke");
}

#[test]
fn test_all() -> Result<()> {
    let input_dir = Path::new("./test_data/programs/in");
    let output_dir = Path::new("./test_data/programs/out");

    let mut succeeded = true;
    for entry in read_dir(input_dir).context("Failed to open input test data folder")? {
        let entry = entry?;
        let path = entry.path();

        let Some(extension) = path.extension() else {
            continue;
        };

        if extension != "json" {
            continue;
        }

        let test_name = AsRef::<Path>::as_ref(
            path.file_name()
                .expect("File name can't be none as the path is to a real file."),
        );

        let input = read_to_string(&path).context("Failed to open input test data file")?;

        let expected = {
            let output_file_name = test_name.with_extension("txt");
            let output_path = output_dir.join(output_file_name);
            read_to_string(output_path).context("Failed to open output test data file")?
        };

        let res = std::panic::catch_unwind(|| {
            check(&input, &expected, &test_name.to_string_lossy());
        });
        if res.is_err() {
            println!("\tFails test case {}", test_name.to_string_lossy());
            succeeded = false;
        }
    }

    assert!(succeeded);

    Ok(())
}

#[test]
fn test_malformed_program() {
    let error = ProgramFile::from_json(r#"{ "statements": [ { "kind": "goto" } ] }"#);
    assert!(error.is_err());
}

#[test]
fn test_json_report() -> Result<()> {
    let input = read_to_string("./test_data/programs/in/division_by_zero.json")
        .context("Failed to open input test data file")?;
    let file = ProgramFile::from_json(&input)?;
    let report = Interpreter::default().run(&file.statements);

    let value: serde_json::Value = serde_json::from_str(&JsonFormatter.render(&report))?;
    assert_eq!(value["variables"][1]["name"], "b");
    assert_eq!(value["error"]["statement"], 2);
    assert_eq!(value["error"]["code"], "RT009");
    assert_eq!(value["error"]["position"], 2);
    Ok(())
}
