// 🖥️ Text Menu - interactive front end over the registry
//
// Line-oriented: reads one answer per line from any BufRead and writes prompts
// to any Write, so the same loop runs on stdin/stdout or in tests.
// Typing `menu` at any id/path prompt returns to the main menu.
// End of input behaves like Exit.

use crate::entities::validate_fine;
use crate::registry::PatronRegistry;
use std::io::{self, BufRead, Write};
use std::path::Path;

const RETURN_HINT: &str = "To return to the main menu, enter 'menu'.";

// ============================================================================
// MENU OPTIONS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuOption {
    Import,
    Create,
    Retrieve,
    Update,
    Delete,
    List,
    Exit,
}

impl MenuOption {
    pub const ALL: [MenuOption; 7] = [
        MenuOption::Import,
        MenuOption::Create,
        MenuOption::Retrieve,
        MenuOption::Update,
        MenuOption::Delete,
        MenuOption::List,
        MenuOption::Exit,
    ];

    /// Parse a 1-7 selection
    pub fn from_input(input: &str) -> Option<Self> {
        let number: usize = input.trim().parse().ok()?;
        number
            .checked_sub(1)
            .and_then(|index| Self::ALL.get(index).copied())
    }

    pub fn label(&self) -> &'static str {
        match self {
            MenuOption::Import => "Import Patron File",
            MenuOption::Create => "Create new Patron",
            MenuOption::Retrieve => "Retrieve Patron",
            MenuOption::Update => "Update Existing Patron",
            MenuOption::Delete => "Remove Existing Patron",
            MenuOption::List => "List All Patrons",
            MenuOption::Exit => "Exit",
        }
    }
}

fn is_menu_keyword(input: &str) -> bool {
    input.trim().eq_ignore_ascii_case("menu")
}

// ============================================================================
// MENU
// ============================================================================

pub struct Menu<R, W> {
    registry: PatronRegistry,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Menu<R, W> {
    pub fn new(registry: PatronRegistry, input: R, output: W) -> Self {
        Menu {
            registry,
            input,
            output,
        }
    }

    pub fn registry(&self) -> &PatronRegistry {
        &self.registry
    }

    /// Give back the registry and the output stream
    pub fn into_parts(self) -> (PatronRegistry, W) {
        (self.registry, self.output)
    }

    /// Run until Exit is chosen or input ends
    pub fn run(&mut self) -> io::Result<()> {
        writeln!(self.output, "Welcome to the Library Management System!")?;

        loop {
            self.print_options()?;

            let Some(choice) = self.read_line()? else {
                return Ok(());
            };

            match MenuOption::from_input(&choice) {
                Some(MenuOption::Import) => self.import_patrons()?,
                Some(MenuOption::Create) => self.create_patron()?,
                Some(MenuOption::Retrieve) => self.retrieve_patron()?,
                Some(MenuOption::Update) => self.update_patron()?,
                Some(MenuOption::Delete) => self.delete_patron()?,
                Some(MenuOption::List) => self.list_patrons()?,
                Some(MenuOption::Exit) => return Ok(()),
                None => writeln!(self.output, "Invalid option selected. Please enter 1-7")?,
            }
        }
    }

    fn print_options(&mut self) -> io::Result<()> {
        writeln!(self.output, "Please select an option:")?;
        for (index, option) in MenuOption::ALL.iter().enumerate() {
            writeln!(self.output, "{}. {}", index + 1, option.label())?;
        }
        Ok(())
    }

    // ========================================================================
    // ACTIONS
    // ========================================================================

    fn import_patrons(&mut self) -> io::Result<()> {
        let path = loop {
            writeln!(self.output, "{}", RETURN_HINT)?;
            writeln!(
                self.output,
                "Please enter the full file path for the patron data file you would like to import: "
            )?;

            let Some(path) = self.read_line()? else {
                return Ok(());
            };
            if is_menu_keyword(&path) {
                return Ok(());
            }
            if !path.trim().is_empty() {
                break path;
            }
        };

        match self.registry.import_file(Path::new(path.trim())) {
            Ok(summary) => writeln!(self.output, "{}", summary),
            Err(err) => writeln!(self.output, "{}", err),
        }
    }

    fn create_patron(&mut self) -> io::Result<()> {
        let Some(id) = self.prompt_id("create", false)? else {
            return Ok(());
        };

        writeln!(self.output, "Please enter the name for the Patron: ")?;
        let Some(name) = self.read_line()? else {
            return Ok(());
        };
        writeln!(self.output, "Please enter the address for the Patron: ")?;
        let Some(address) = self.read_line()? else {
            return Ok(());
        };
        let Some(fine) = self.prompt_fine("Please enter the Overdue Fine Amount for the Patron: ")?
        else {
            return Ok(());
        };

        match self.registry.create(&id, &name, &address, &fine) {
            Ok(()) => writeln!(self.output, "Patron {} has been created.", id),
            Err(err) => writeln!(self.output, "Unable to create patron.\n{}", err),
        }
    }

    fn retrieve_patron(&mut self) -> io::Result<()> {
        let Some(id) = self.prompt_id("retrieve", true)? else {
            return Ok(());
        };

        match self.registry.retrieve(&id) {
            Ok(patron) => writeln!(self.output, "{}", patron.render()),
            Err(err) => writeln!(self.output, "{}", err),
        }
    }

    fn update_patron(&mut self) -> io::Result<()> {
        let Some(id) = self.prompt_id("update", true)? else {
            return Ok(());
        };

        writeln!(
            self.output,
            "Please enter the updated name for the Patron (leave blank for no update): "
        )?;
        let Some(name) = self.read_line()? else {
            return Ok(());
        };
        writeln!(
            self.output,
            "Please enter the updated address for the Patron (leave blank for no update): "
        )?;
        let Some(address) = self.read_line()? else {
            return Ok(());
        };
        let Some(fine) = self.prompt_fine(
            "Please enter the updated Overdue Fine Amount for the Patron (leave blank for no update): ",
        )?
        else {
            return Ok(());
        };

        if [&name, &address, &fine].iter().all(|value| value.trim().is_empty()) {
            return writeln!(self.output, "No changes made to the Patron.");
        }

        match self.registry.update(&id, &name, &address, &fine) {
            Ok(()) => writeln!(self.output, "Patron {} has been updated.", id),
            Err(err) => writeln!(self.output, "{}", err),
        }
    }

    fn delete_patron(&mut self) -> io::Result<()> {
        let Some(id) = self.prompt_id("delete", true)? else {
            return Ok(());
        };

        match self.registry.delete(&id) {
            Ok(_) => writeln!(self.output, "Patron {} has been deleted.", id),
            Err(err) => writeln!(self.output, "{}", err),
        }
    }

    fn list_patrons(&mut self) -> io::Result<()> {
        writeln!(self.output, "{}", self.registry.list_all())
    }

    // ========================================================================
    // PROMPTS
    // ========================================================================

    /// Next input line without its line ending; `None` at end of input
    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\n', '\r']).to_string()))
    }

    /// Ask for a well-formed id that must (or must not) already exist
    ///
    /// `None` means go back to the main menu.
    fn prompt_id(&mut self, action: &str, should_exist: bool) -> io::Result<Option<String>> {
        if should_exist && self.registry.is_empty() {
            writeln!(
                self.output,
                "No Patrons in the collection. Please add Patrons before performing this action."
            )?;
            return Ok(None);
        }

        loop {
            writeln!(self.output, "{}", RETURN_HINT)?;
            writeln!(
                self.output,
                "Please enter the id of the Patron you would like to {}: ",
                action
            )?;

            let Some(input) = self.read_line()? else {
                return Ok(None);
            };
            let id = input.trim();

            if id.is_empty() {
                continue;
            }
            if is_menu_keyword(id) {
                return Ok(None);
            }
            if let Err(err) = self.registry.validate_id_format(id) {
                writeln!(self.output, "{}", err)?;
                continue;
            }

            match (self.registry.exists(id), should_exist) {
                (false, true) => writeln!(
                    self.output,
                    "Patron ID does not exist. Please enter a valid Patron ID."
                )?,
                (true, false) => writeln!(
                    self.output,
                    "Patron ID already exists. Please enter a new Patron ID."
                )?,
                _ => return Ok(Some(id.to_string())),
            }
        }
    }

    /// Ask for a fine until it validates; blank is passed through as ""
    fn prompt_fine(&mut self, message: &str) -> io::Result<Option<String>> {
        loop {
            writeln!(self.output, "{}", message)?;

            let Some(fine) = self.read_line()? else {
                return Ok(None);
            };

            if fine.trim().is_empty() {
                return Ok(Some(String::new()));
            }

            match validate_fine(&fine) {
                Ok(_) => return Ok(Some(fine)),
                Err(err) => writeln!(self.output, "{}", err)?,
            }
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
