//! Interactive numbered menu.
//!
//! # Responsibility
//! - Read choices and arguments line by line, call [`ContactService`], print
//!   results.
//!
//! # Invariants
//! - A failed operation is reported and the loop continues.
//! - Non-numeric paged-view input never reaches the service.
//! - End of input ends the loop like the exit choice.

use log::{info, warn};
use phonebook_core::{read_contact_file, Contact, ContactService};
use std::fmt::{Display, Formatter};
use std::io::{self, BufRead, Write};

const MENU: &str = "\
Phonebook:
1. Add contact
2. Import from CSV
3. Update or insert contact
4. Search
5. Paged view
6. Delete by name or phone
7. Show all
8. Exit";

/// Non-numeric text typed at a numeric prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputFormatError {
    pub field: &'static str,
    pub input: String,
}

impl Display for InputFormatError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} must be a whole number, got `{}`", self.field, self.input)
    }
}

impl std::error::Error for InputFormatError {}

pub fn parse_number(field: &'static str, input: &str) -> Result<i64, InputFormatError> {
    input.trim().parse().map_err(|_| InputFormatError {
        field,
        input: input.to_string(),
    })
}

/// Runs the menu until the exit choice or end of input.
pub fn run_menu<R: BufRead, W: Write>(
    service: &ContactService,
    input: R,
    output: W,
) -> io::Result<()> {
    Menu {
        service,
        input,
        output,
    }
    .run()
}

struct Menu<'a, R, W> {
    service: &'a ContactService,
    input: R,
    output: W,
}

enum Step {
    Continue,
    Exit,
}

impl<R: BufRead, W: Write> Menu<'_, R, W> {
    fn run(&mut self) -> io::Result<()> {
        loop {
            writeln!(self.output, "{MENU}")?;
            let Some(choice) = self.prompt("Your choice: ")? else {
                return Ok(());
            };
            if let Step::Exit = self.dispatch(choice.trim())? {
                return Ok(());
            }
        }
    }

    fn dispatch(&mut self, choice: &str) -> io::Result<Step> {
        match choice {
            "1" | "3" => self.add_or_update(),
            "2" => self.import_file(),
            "4" => self.search(),
            "5" => self.paged_view(),
            "6" => self.delete(),
            "7" => {
                let result = self.service.list_all();
                self.print_contacts(result)?;
                Ok(Step::Continue)
            }
            "8" => Ok(Step::Exit),
            _ => {
                writeln!(self.output, "Invalid choice, try again.")?;
                Ok(Step::Continue)
            }
        }
    }

    fn add_or_update(&mut self) -> io::Result<Step> {
        let Some(name) = self.prompt("Name: ")? else {
            return Ok(Step::Exit);
        };
        let Some(phone) = self.prompt("Phone: ")? else {
            return Ok(Step::Exit);
        };

        match self.service.upsert(&name, &phone) {
            Ok(_) => writeln!(self.output, "Saved: {name} -> {phone}")?,
            Err(err) => self.report(&err)?,
        }
        Ok(Step::Continue)
    }

    fn import_file(&mut self) -> io::Result<Step> {
        let Some(path) = self.prompt("Path to CSV file: ")? else {
            return Ok(Step::Exit);
        };
        let path = path.trim();

        let batch = match read_contact_file(path) {
            Ok(batch) => batch,
            Err(err) => {
                self.report(&err)?;
                return Ok(Step::Continue);
            }
        };

        match self.service.bulk_insert(&batch.names, &batch.phones) {
            Ok(ids) => {
                info!(
                    "event=menu_import module=cli status=ok rows={} skipped={}",
                    ids.len(),
                    batch.skipped
                );
                writeln!(
                    self.output,
                    "Imported {} contacts from {path} (skipped {} short records)",
                    ids.len(),
                    batch.skipped
                )?;
            }
            Err(err) => self.report(&err)?,
        }
        Ok(Step::Continue)
    }

    fn search(&mut self) -> io::Result<Step> {
        let Some(fragment) = self.prompt("Search: ")? else {
            return Ok(Step::Exit);
        };
        let result = self.service.search(&fragment);
        self.print_contacts(result)?;
        Ok(Step::Continue)
    }

    fn paged_view(&mut self) -> io::Result<Step> {
        let Some(limit) = self.prompt("Limit: ")? else {
            return Ok(Step::Exit);
        };
        let limit = match parse_number("limit", &limit) {
            Ok(limit) => limit,
            Err(err) => return self.reject_number(&err),
        };

        let Some(offset) = self.prompt("Offset: ")? else {
            return Ok(Step::Exit);
        };
        let offset = match parse_number("offset", &offset) {
            Ok(offset) => offset,
            Err(err) => return self.reject_number(&err),
        };

        let result = self.service.list_page(limit, offset);
        self.print_contacts(result)?;
        Ok(Step::Continue)
    }

    /// Abandons the current action; the next line is read as a menu choice.
    fn reject_number(&mut self, err: &InputFormatError) -> io::Result<Step> {
        warn!("event=menu_input module=cli status=error field={}", err.field);
        writeln!(self.output, "Please enter whole numbers.")?;
        Ok(Step::Continue)
    }

    fn delete(&mut self) -> io::Result<Step> {
        let Some(token) = self.prompt("Name or phone to delete: ")? else {
            return Ok(Step::Exit);
        };
        match self.service.delete_by_match(&token) {
            Ok(removed) => writeln!(self.output, "Deleted {removed} contacts matching {token}")?,
            Err(err) => self.report(&err)?,
        }
        Ok(Step::Continue)
    }

    fn print_contacts<E: Display>(&mut self, result: Result<Vec<Contact>, E>) -> io::Result<()> {
        match result {
            Ok(contacts) if contacts.is_empty() => writeln!(self.output, "No contacts found."),
            Ok(contacts) => {
                for contact in &contacts {
                    writeln!(self.output, "{contact}")?;
                }
                Ok(())
            }
            Err(err) => self.report(&err),
        }
    }

    fn report(&mut self, err: &impl Display) -> io::Result<()> {
        writeln!(self.output, "Error: {err}")
    }

    /// Returns the entered line without its line terminator, or `None` at EOF.
    fn prompt(&mut self, label: &str) -> io::Result<Option<String>> {
        write!(self.output, "{label}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed_len = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed_len);
        Ok(Some(line))
    }
}

#[cfg(test)]
mod tests {
    use super::{parse_number, run_menu, InputFormatError};
    use phonebook_core::{ContactService, StoreConfig};
    use tempfile::TempDir;

    fn service_in(dir: &TempDir) -> ContactService {
        let service = ContactService::new(StoreConfig::new(dir.path().join("menu.db")));
        service.ensure_schema().unwrap();
        service
    }

    fn run_script(service: &ContactService, script: &str) -> String {
        let mut output = Vec::new();
        run_menu(service, script.as_bytes(), &mut output).unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn parse_number_accepts_padded_integers_and_rejects_text() {
        assert_eq!(parse_number("limit", " 12 ").unwrap(), 12);
        assert_eq!(parse_number("offset", "-3").unwrap(), -3);
        assert_eq!(
            parse_number("limit", "ten").unwrap_err(),
            InputFormatError {
                field: "limit",
                input: "ten".to_string()
            }
        );
    }

    #[test]
    fn add_then_show_all_lists_contact() {
        let dir = tempfile::tempdir().unwrap();
        let service = service_in(&dir);

        let output = run_script(&service, "1\nAnn\n555-0142\n7\n8\n");

        assert!(output.contains("Saved: Ann -> 555-0142"));
        assert!(output.contains("1: Ann 555-0142"));
    }

    #[test]
    fn option_three_is_an_alias_for_upsert() {
        let dir = tempfile::tempdir().unwrap();
        let service = service_in(&dir);

        run_script(&service, "1\nAnn\n111\n3\nAnn\n222\n8\n");

        let all = service.list_all().unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].phone_number, "222");
    }

    #[test]
    fn non_numeric_paging_input_is_reported_and_loop_continues() {
        let dir = tempfile::tempdir().unwrap();
        let service = service_in(&dir);
        service.upsert("Ann", "1").unwrap();

        let output = run_script(&service, "5\nabc\n7\n8\n");

        assert!(output.contains("Limit: Please enter whole numbers."));
        assert!(!output.contains("Offset: "));
        assert!(output.contains("1: Ann 1"));
    }

    #[test]
    fn non_numeric_offset_is_reported_after_valid_limit() {
        let dir = tempfile::tempdir().unwrap();
        let service = service_in(&dir);
        service.upsert("Ann", "1").unwrap();

        let output = run_script(&service, "5\n2\nzero\n7\n8\n");

        assert!(output.contains("Offset: Please enter whole numbers."));
        assert!(output.contains("1: Ann 1"));
        assert_eq!(output.matches("Phonebook:").count(), 3);
    }

    #[test]
    fn paged_view_prints_requested_window() {
        let dir = tempfile::tempdir().unwrap();
        let service = service_in(&dir);
        for name in ["a", "b", "c"] {
            service.upsert(name, "0").unwrap();
        }

        let output = run_script(&service, "5\n1\n1\n8\n");

        assert!(output.contains("2: b 0"));
        assert!(!output.contains("1: a 0"));
        assert!(!output.contains("3: c 0"));
    }

    #[test]
    fn invalid_choice_reprints_menu() {
        let dir = tempfile::tempdir().unwrap();
        let service = service_in(&dir);

        let output = run_script(&service, "42\n8\n");

        assert!(output.contains("Invalid choice, try again."));
        assert_eq!(output.matches("Phonebook:").count(), 2);
    }

    #[test]
    fn import_reports_validation_error_for_empty_file() {
        let dir = tempfile::tempdir().unwrap();
        let service = service_in(&dir);
        let csv_path = dir.path().join("empty.csv");
        std::fs::write(&csv_path, "only-one-field\n").unwrap();

        let output = run_script(&service, &format!("2\n{}\n8\n", csv_path.display()));

        assert!(output.contains("Error: arrays must match in size and not be empty"));
        assert!(service.list_all().unwrap().is_empty());
    }

    #[test]
    fn import_then_search_and_delete() {
        let dir = tempfile::tempdir().unwrap();
        let service = service_in(&dir);
        let csv_path = dir.path().join("contacts.csv");
        std::fs::write(&csv_path, "Ann,555-0142\nno-phone\nBob,000\n").unwrap();

        let script = format!("2\n{}\n4\n42\n6\n555-0142\n6\n555-0142\n8\n", csv_path.display());
        let output = run_script(&service, &script);

        assert!(output.contains("Imported 2 contacts from"));
        assert!(output.contains("(skipped 1 short records)"));
        assert!(output.contains("1: Ann 555-0142"));
        assert!(!output.contains("2: Bob 000"));
        assert!(output.contains("Deleted 1 contacts matching 555-0142"));
        assert!(output.contains("Deleted 0 contacts matching 555-0142"));
    }

    #[test]
    fn end_of_input_exits_cleanly() {
        let dir = tempfile::tempdir().unwrap();
        let service = service_in(&dir);

        let output = run_script(&service, "1\nAnn\n");

        assert!(output.ends_with("Phone: "));
        assert!(service.list_all().unwrap().is_empty());
    }

    #[test]
    fn store_errors_are_printed_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let service = ContactService::new(StoreConfig::new(
            dir.path().join("missing").join("menu.db"),
        ));

        let output = run_script(&service, "7\n8\n");

        assert!(output.contains("Error: cannot open contact store"));
        assert_eq!(output.matches("Phonebook:").count(), 2);
    }
}
