#![deny(clippy::all)]
#![deny(clippy::pedantic)]

use std::{fs, io};

use anyhow::{Context, Result};
use camino::{Utf8Path, Utf8PathBuf};
use cbz::Viewer;
use clap::Parser;
use cli_table::{print_stdout, WithTitle};
use dialoguer::Input;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::args::{Args, Browse, List, Page, Subcommands};
use crate::types::PageRow;

mod args;
mod types;

fn open(archive: &Utf8Path) -> Result<Viewer> {
    let mut viewer = Viewer::new();
    viewer
        .open(archive)
        .with_context(|| format!("couldn't open {archive}"))?;

    Ok(viewer)
}

fn list(archive: &Utf8Path) -> Result<()> {
    let viewer = open(archive)?;

    let rows = viewer
        .list_pages()
        .into_iter()
        .enumerate()
        .map(|(index, name)| PageRow::new(index, name))
        .collect::<Vec<_>>();

    print_stdout(rows.with_title())?;

    Ok(())
}

fn page(
    Page {
        archive,
        index,
        output,
        data_uri,
    }: Page,
) -> Result<()> {
    let mut viewer = open(&archive)?;

    if data_uri {
        println!("{}", viewer.get_page_data_uri(index)?);
        return Ok(());
    }

    let page = viewer.get_page(index)?;
    let output =
        output.unwrap_or_else(|| Utf8PathBuf::from(sanitize_filename::sanitize(page.name())));
    debug!("writing {} bytes to {output}", page.bytes().len());
    fs::write(&output, page.bytes()).with_context(|| format!("couldn't write {output}"))?;
    println!("{} ({}) written to {output}", page.name(), page.media_type());

    Ok(())
}

/// Status line of the current page, a page that can't be read is reported
/// without ending the session
fn describe_current_page(viewer: &mut Viewer) -> String {
    let status = viewer.status().unwrap_or_default();
    match viewer.current_page() {
        Ok(page) => format!(
            "{status} ({}, {} bytes)",
            page.media_type(),
            page.bytes().len()
        ),
        Err(err) => format!("{status}: {err}"),
    }
}

fn browse(archive: &Utf8Path) -> Result<()> {
    let mut viewer = open(archive)?;

    let Some(status) = viewer.status() else {
        println!("{archive} doesn't contain any page");
        return Ok(());
    };
    println!("{status}");

    loop {
        let command: String = Input::new()
            .with_prompt("[n]ext, [p]revious, page number or [q]uit")
            .default("n".to_string())
            .interact_text()?;

        match command.trim() {
            "q" | "quit" => break,
            "n" | "next" => {
                if !viewer.next_page() {
                    println!("already on the last page");
                }
            }
            "p" | "prev" | "previous" => {
                if !viewer.previous_page() {
                    println!("already on the first page");
                }
            }
            other => match other.parse::<usize>() {
                Ok(number) if number > 0 => {
                    if let Err(err) = viewer.go_to(number - 1) {
                        println!("{err}");
                        continue;
                    }
                }
                _ => {
                    println!("unknown command {other}");
                    continue;
                }
            },
        }

        println!("{}", describe_current_page(&mut viewer));
    }

    viewer.close();

    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    match args.command {
        Subcommands::List(List { archive }) => list(&archive),
        Subcommands::Page(args) => page(args),
        Subcommands::Browse(Browse { archive }) => browse(&archive),
    }
}
