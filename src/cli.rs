use std::path::PathBuf;

use chrono::{Days, Local, NaiveDate};
use clap::{Args, Parser, Subcommand, ValueEnum};

use elidune_desk::{
    error::ErrorCode,
    models::{Book, BookEdit, LoanDetails, Member, MemberEdit, MemberRole, NewBook, NewMember},
    AppError, AppResult, AppState, CatalogService,
};

#[derive(Parser)]
#[command(name = "elidune-desk")]
#[command(about = "Track a library's books, members and loans")]
#[command(version)]
#[command(after_long_help = r#"
EXAMPLES:
    # Add a book with two copies
    elidune-desk books add --title Dune --author "Frank Herbert" --copies 2

    # Register a student
    elidune-desk members add --kind student --name Ada --roll R100

    # Lend book 1 to member 1 for the default duration
    elidune-desk loans issue --book 1 --member 1

    # Show loans past their due date
    elidune-desk loans list --overdue
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Extra configuration file layered over config/default
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Directory holding the catalog files
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Manage books
    Books {
        #[command(subcommand)]
        command: BookCommands,
    },

    /// Manage members
    Members {
        #[command(subcommand)]
        command: MemberCommands,
    },

    /// Issue, return and list loans
    Loans {
        #[command(subcommand)]
        command: LoanCommands,
    },
}

#[derive(Subcommand)]
pub enum BookCommands {
    /// List books, optionally filtered by title, author or ISBN
    List {
        #[arg(long, short)]
        search: Option<String>,
    },

    /// Add a book
    Add {
        #[arg(long)]
        title: String,
        #[arg(long, default_value = "")]
        author: String,
        #[arg(long, default_value = "")]
        isbn: String,
        #[arg(long, default_value_t = 1)]
        copies: u32,
        #[arg(long, default_value = "")]
        category: String,
    },

    /// Edit a book; omitted fields keep their value
    Edit {
        id: i32,
        #[command(flatten)]
        fields: BookFields,
    },

    /// Delete a book and its loan history
    Delete { id: i32 },
}

#[derive(Args)]
pub struct BookFields {
    #[arg(long)]
    title: Option<String>,
    #[arg(long)]
    author: Option<String>,
    #[arg(long)]
    isbn: Option<String>,
    #[arg(long)]
    copies: Option<u32>,
    #[arg(long)]
    category: Option<String>,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum KindArg {
    Student,
    Librarian,
}

impl From<KindArg> for MemberRole {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Student => MemberRole::Student,
            KindArg::Librarian => MemberRole::Librarian,
        }
    }
}

#[derive(Subcommand)]
pub enum MemberCommands {
    /// List members
    List {
        /// Only members of this kind
        #[arg(long, value_enum)]
        kind: Option<KindArg>,
    },

    /// Register a member
    Add {
        #[arg(long, value_enum)]
        kind: KindArg,
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "")]
        email: String,
        #[arg(long, default_value = "")]
        phone: String,
        /// Roll number, required for students
        #[arg(long)]
        roll: Option<String>,
    },

    /// Edit a member; omitted fields keep their value
    Edit {
        id: i32,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        roll: Option<String>,
    },

    /// Delete a member and their loan history
    Delete { id: i32 },
}

#[derive(Subcommand)]
pub enum LoanCommands {
    /// List loans with book titles and member names
    List {
        /// Only loans not yet returned
        #[arg(long)]
        active: bool,
        /// Only loans past their due date
        #[arg(long, conflicts_with = "active")]
        overdue: bool,
    },

    /// Lend one copy of a book
    Issue {
        #[arg(long)]
        book: i32,
        #[arg(long)]
        member: i32,
        /// Issue date (YYYY-MM-DD), today by default
        #[arg(long)]
        date: Option<NaiveDate>,
        /// Loan length in days, from configuration by default
        #[arg(long)]
        days: Option<u32>,
    },

    /// Return a loaned copy
    Return {
        id: i32,
        /// Return date (YYYY-MM-DD), today by default
        #[arg(long)]
        date: Option<NaiveDate>,
    },
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Due date `days` after `issue_date`
fn due_date(issue_date: NaiveDate, days: u32) -> AppResult<NaiveDate> {
    issue_date
        .checked_add_days(Days::new(u64::from(days)))
        .ok_or_else(|| AppError::Validation("Loan length out of range".to_string()))
}

/// Process exit status: 0 on success, the error code otherwise
pub fn exit_status(result: &AppResult<()>) -> u8 {
    match result {
        Ok(()) => ErrorCode::Success as u8,
        Err(e) => e.code() as u8,
    }
}

fn book_line(book: &Book) -> String {
    let mut line = book.to_string();
    if !book.category.is_empty() {
        line.push_str(&format!(" [{}]", book.category));
    }
    if book.on_loan() > 0 {
        line.push_str(&format!(" {} on loan", book.on_loan()));
    }
    line
}

fn member_rows(catalog: &CatalogService, role: Option<MemberRole>) -> Vec<&Member> {
    catalog
        .members()
        .iter()
        .filter(|m| role.map_or(true, |r| m.role() == r))
        .collect()
}

/// Loans shown by `loans list`. `overdue` implies active.
fn loan_rows(
    catalog: &CatalogService,
    active: bool,
    overdue: bool,
    today: NaiveDate,
) -> Vec<LoanDetails> {
    let details = if active || overdue {
        catalog.active_loan_details(today)
    } else {
        catalog.loan_details(today)
    };
    details
        .into_iter()
        .filter(|d| !overdue || d.is_overdue)
        .collect()
}

pub fn run(command: Commands, state: &mut AppState) -> AppResult<()> {
    match command {
        Commands::Books { command } => books(command, state),
        Commands::Members { command } => members(command, state),
        Commands::Loans { command } => loans(command, state),
    }
}

fn books(command: BookCommands, state: &mut AppState) -> AppResult<()> {
    let catalog = &mut state.catalog;
    match command {
        BookCommands::List { search } => {
            let books = catalog.search_books(search.as_deref().unwrap_or(""));
            if books.is_empty() {
                println!("No books");
            }
            for book in books {
                println!("{}", book_line(book));
            }
        }
        BookCommands::Add {
            title,
            author,
            isbn,
            copies,
            category,
        } => {
            let book = catalog.add_book(NewBook {
                title,
                author,
                isbn,
                total_copies: copies,
                category,
            })?;
            println!("Added {}", book);
        }
        BookCommands::Edit { id, fields } => {
            let book = catalog.edit_book(
                id,
                BookEdit {
                    title: fields.title,
                    author: fields.author,
                    isbn: fields.isbn,
                    total_copies: fields.copies,
                    category: fields.category,
                },
            )?;
            println!("Updated {}", book);
        }
        BookCommands::Delete { id } => {
            let book = catalog.delete_book(id)?;
            println!("Deleted {}", book);
        }
    }
    Ok(())
}

fn members(command: MemberCommands, state: &mut AppState) -> AppResult<()> {
    let catalog = &mut state.catalog;
    match command {
        MemberCommands::List { kind } => {
            let members = member_rows(catalog, kind.map(MemberRole::from));
            if members.is_empty() {
                println!("No members");
            }
            for member in members {
                println!("{} <{}> {}", member, member.email, member.phone);
            }
        }
        MemberCommands::Add {
            kind,
            name,
            email,
            phone,
            roll,
        } => {
            let member = catalog.add_member(NewMember {
                role: kind.into(),
                name,
                email,
                phone,
                roll_number: roll,
            })?;
            println!("Added {}", member);
        }
        MemberCommands::Edit {
            id,
            name,
            email,
            phone,
            roll,
        } => {
            let member = catalog.edit_member(
                id,
                MemberEdit {
                    name,
                    email,
                    phone,
                    roll_number: roll,
                },
            )?;
            println!("Updated {}", member);
        }
        MemberCommands::Delete { id } => {
            let member = catalog.delete_member(id)?;
            println!("Deleted {}", member);
        }
    }
    Ok(())
}

fn loans(command: LoanCommands, state: &mut AppState) -> AppResult<()> {
    let today = today();
    match command {
        LoanCommands::List { active, overdue } => {
            let shown = loan_rows(&state.catalog, active, overdue, today);
            if shown.is_empty() {
                println!("No loans");
            }
            for loan in shown {
                println!("{}", loan);
            }
        }
        LoanCommands::Issue {
            book,
            member,
            date,
            days,
        } => {
            let issue_date = date.unwrap_or(today);
            let days = days.unwrap_or(state.config.loans.default_duration_days);
            let due_date = due_date(issue_date, days)?;
            let loan = state.catalog.issue_book(book, member, issue_date, due_date)?;
            println!("Issued! Loan ID: {} (due {})", loan.id, loan.due_date);
        }
        LoanCommands::Return { id, date } => {
            let loan = state.catalog.return_book(id, date.unwrap_or(today))?;
            println!("Returned. {}", loan);
        }
    }
    Ok(())
}
