//! Reading recipe corpora from disk.
//!
//! Accepts a single `.csv`, `.json` or `.jsonl` file, or a directory that is
//! walked recursively for such files in sorted path order. Every record needs
//! `recipe_name`, `ingredients_list` and `image_url`; one bad record aborts
//! the whole load.

use crate::error::{Error, Result};
use crate::recipe::Recipe;
use serde::Deserialize;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

const REQUIRED_COLUMNS: [&str; 3] = ["recipe_name", "ingredients_list", "image_url"];

#[derive(Debug, Deserialize)]
struct InputRecipe {
    recipe_name: Option<String>,
    ingredients_list: Option<String>,
    image_url: Option<String>,
}

impl InputRecipe {
    fn into_recipe(self, record: usize, image_required: bool) -> Result<Recipe> {
        let name = required(self.recipe_name, record, "recipe_name")?;
        let ingredients = required(self.ingredients_list, record, "ingredients_list")?;
        let image_url = match self.image_url {
            Some(url) => url,
            None if image_required => return Err(Error::MissingField { record, field: "image_url" }),
            None => String::new(),
        };
        Ok(Recipe { name, ingredients, image_url })
    }
}

fn required(value: Option<String>, record: usize, field: &'static str) -> Result<String> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(Error::MissingField { record, field }),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Csv,
    Json,
    JsonLines,
}

impl Format {
    fn of(path: &Path) -> Option<Self> {
        match path.extension().and_then(|s| s.to_str()) {
            Some("csv") => Some(Format::Csv),
            Some("json") => Some(Format::Json),
            Some("jsonl") => Some(Format::JsonLines),
            _ => None,
        }
    }
}

/// Load every recipe under `path`, in file order then record order.
pub fn load_corpus<P: AsRef<Path>>(path: P) -> Result<Vec<Recipe>> {
    let path = path.as_ref();
    let files = corpus_files(path)?;
    let mut recipes = Vec::new();
    for (file, format) in files {
        let before = recipes.len();
        match format {
            Format::Csv => load_csv(&file, &mut recipes)?,
            Format::Json => load_json(&file, &mut recipes)?,
            Format::JsonLines => load_jsonl(&file, &mut recipes)?,
        }
        tracing::info!(file = %file.display(), recipes = recipes.len() - before, "loaded corpus file");
    }
    Ok(recipes)
}

fn corpus_files(path: &Path) -> Result<Vec<(PathBuf, Format)>> {
    if path.is_file() {
        let format = Format::of(path).ok_or_else(|| Error::UnsupportedFormat(path.to_path_buf()))?;
        return Ok(vec![(path.to_path_buf(), format)]);
    }
    if !path.is_dir() {
        return Err(Error::NoCorpusFiles(path.to_path_buf()));
    }
    let mut files: Vec<(PathBuf, Format)> = WalkDir::new(path)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter_map(|e| Format::of(e.path()).map(|f| (e.into_path(), f)))
        .collect();
    files.sort_by(|a, b| a.0.cmp(&b.0));
    if files.is_empty() {
        return Err(Error::NoCorpusFiles(path.to_path_buf()));
    }
    Ok(files)
}

fn load_csv(file: &Path, out: &mut Vec<Recipe>) -> Result<()> {
    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::Headers).from_path(file)?;
    let headers = reader.headers()?.clone();
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(Error::MissingColumn { path: file.to_path_buf(), column });
        }
    }
    for row in reader.deserialize::<InputRecipe>() {
        let record = out.len();
        // The column exists, so an empty cell is a recipe without a picture.
        out.push(row?.into_recipe(record, false)?);
    }
    Ok(())
}

fn load_json(file: &Path, out: &mut Vec<Recipe>) -> Result<()> {
    let reader = BufReader::new(File::open(file)?);
    let json: serde_json::Value = serde_json::from_reader(reader)?;
    match json {
        serde_json::Value::Array(arr) => {
            for v in arr {
                push_json(v, out)?;
            }
        }
        other => push_json(other, out)?,
    }
    Ok(())
}

fn load_jsonl(file: &Path, out: &mut Vec<Recipe>) -> Result<()> {
    let reader = BufReader::new(File::open(file)?);
    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        push_json(serde_json::from_str(&line)?, out)?;
    }
    Ok(())
}

fn push_json(value: serde_json::Value, out: &mut Vec<Recipe>) -> Result<()> {
    let record = out.len();
    let input: InputRecipe = serde_json::from_value(value)?;
    out.push(input.into_recipe(record, true)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn reads_csv_with_extra_columns() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("recipes.csv");
        fs::write(
            &file,
            "recipe_name,ingredients_list,image_url,cuisine\n\
             Pasta Pomodoro,\"pasta, tomato, basil\",https://img/1.jpg,italian\n\
             Rice and Beans,\"rice, beans\",,mexican\n",
        )
        .unwrap();
        let recipes = load_corpus(&file).unwrap();
        assert_eq!(recipes.len(), 2);
        assert_eq!(recipes[0].ingredients, "pasta, tomato, basil");
        assert_eq!(recipes[1].image_url, "");
    }

    #[test]
    fn csv_without_required_column_is_fatal() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("recipes.csv");
        fs::write(&file, "recipe_name,ingredients_list\nSoup,water\n").unwrap();
        match load_corpus(&file) {
            Err(Error::MissingColumn { column, .. }) => assert_eq!(column, "image_url"),
            other => panic!("expected MissingColumn, got {other:?}"),
        }
    }

    #[test]
    fn blank_ingredients_abort_the_load() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("recipes.csv");
        fs::write(&file, "recipe_name,ingredients_list,image_url\nA,egg,x\nB,,y\n").unwrap();
        match load_corpus(&file) {
            Err(Error::MissingField { record, field }) => {
                assert_eq!(record, 1);
                assert_eq!(field, "ingredients_list");
            }
            other => panic!("expected MissingField, got {other:?}"),
        }
    }

    #[test]
    fn json_requires_image_url_key() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("recipes.json");
        fs::write(&file, r#"[{"recipe_name":"A","ingredients_list":"egg"}]"#).unwrap();
        assert!(matches!(load_corpus(&file), Err(Error::MissingField { field: "image_url", .. })));
    }

    #[test]
    fn directory_is_loaded_in_path_order() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("nested")).unwrap();
        fs::write(
            dir.path().join("b.jsonl"),
            "{\"recipe_name\":\"Second\",\"ingredients_list\":\"rice\",\"image_url\":\"\"}\n\n",
        )
        .unwrap();
        fs::write(
            dir.path().join("a.json"),
            r#"{"recipe_name":"First","ingredients_list":"egg","image_url":"u"}"#,
        )
        .unwrap();
        fs::write(
            dir.path().join("nested/c.csv"),
            "recipe_name,ingredients_list,image_url\nThird,flour,v\n",
        )
        .unwrap();
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let names: Vec<String> = load_corpus(dir.path()).unwrap().into_iter().map(|r| r.name).collect();
        assert_eq!(names, vec!["First", "Second", "Third"]);
    }

    #[test]
    fn unsupported_or_missing_paths_are_errors() {
        let dir = tempdir().unwrap();
        let txt = dir.path().join("recipes.txt");
        fs::write(&txt, "x").unwrap();
        assert!(matches!(load_corpus(&txt), Err(Error::UnsupportedFormat(_))));
        assert!(matches!(load_corpus(dir.path().join("missing")), Err(Error::NoCorpusFiles(_))));
        let empty = tempdir().unwrap();
        assert!(matches!(load_corpus(empty.path()), Err(Error::NoCorpusFiles(_))));
    }
}
