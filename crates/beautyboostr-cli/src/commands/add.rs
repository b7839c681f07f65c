use beautyboostr_core::builder::{BuilderState, FormField, FormValues};
use beautyboostr_core::error::CatalogError;
use beautyboostr_core::model::{FunctionField, FunctionRule};
use beautyboostr_core::RecordBuilder;
use std::io::{self, BufRead, Write};

use crate::AddArgs;

const PASTE_REMINDER: &str =
    "Now copy this record and add it to the list in the catalog file (data/ingredients.json).";

pub fn run(args: AddArgs) -> Result<(), CatalogError> {
    let interactive = args.interactive;
    let mut builder = prefill(args)?;

    if interactive {
        let stdin = io::stdin();
        let stdout = io::stdout();
        run_session(&mut builder, stdin.lock(), stdout.lock())?;
    } else {
        let json = builder.submit()?;
        println!("{json}");
        eprintln!("{PASTE_REMINDER}");
    }
    Ok(())
}

/// Seed a builder from command-line flags. Every `--function` fills one slot.
fn prefill(args: AddArgs) -> Result<RecordBuilder, CatalogError> {
    let mut builder = RecordBuilder::new();
    *builder.form_mut() = FormValues {
        inci: args.inci,
        name_ua: args.name_ua,
        origin: args.origin,
        nature: args.nature,
        ecology: args.ecology,
        physical_form: args.physical_form,
        restrictions: args.restrictions,
        usage_gel: args.usage_gel,
        usage_cream: args.usage_cream,
        usage_tonic: args.usage_tonic,
    };
    for (i, rule) in args.functions.into_iter().enumerate() {
        if i > 0 {
            builder.add_function_slot();
        }
        builder.set_function(i, rule)?;
    }
    Ok(builder)
}

/// Parse `IF_Percent|IF_pH|Target|Function`. Missing trailing parts are blank.
pub fn parse_function_spec(spec: &str) -> Result<FunctionRule, String> {
    let parts: Vec<&str> = spec.split('|').map(str::trim).collect();
    if parts.len() > 4 {
        return Err(format!(
            "expected at most 4 '|'-separated parts (IF_Percent|IF_pH|Target|Function), got {}",
            parts.len()
        ));
    }
    let part = |i: usize| Some(parts.get(i).copied().unwrap_or("").to_string());
    Ok(FunctionRule {
        if_percent: part(0),
        if_ph: part(1),
        target: part(2),
        function: part(3),
    })
}

#[derive(Debug, PartialEq, Eq)]
enum SessionCommand {
    Set(FormField, String),
    Function(usize, FunctionField, String),
    AddFunction,
    RemoveFunction,
    Show,
    Submit,
    Help,
    Quit,
}

fn parse_command(line: &str) -> Result<Option<SessionCommand>, String> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }
    let (verb, rest) = split_word(line);
    let command = match verb {
        "set" => {
            let (field, value) = split_word(rest);
            let field: FormField = field.parse().map_err(|e: CatalogError| e.to_string())?;
            SessionCommand::Set(field, value.to_string())
        }
        "fn" => {
            let (number, rest) = split_word(rest);
            let number: usize = number
                .parse()
                .map_err(|_| format!("'{number}' is not a function number"))?;
            if number == 0 {
                return Err("function numbers start at 1".into());
            }
            let (field, value) = split_word(rest);
            let field: FunctionField =
                field.parse().map_err(|e: CatalogError| e.to_string())?;
            SessionCommand::Function(number - 1, field, value.to_string())
        }
        "add-fn" => SessionCommand::AddFunction,
        "remove-fn" => SessionCommand::RemoveFunction,
        "show" => SessionCommand::Show,
        "submit" => SessionCommand::Submit,
        "help" | "?" => SessionCommand::Help,
        "quit" | "exit" => SessionCommand::Quit,
        other => return Err(format!("unknown command '{other}' (try 'help')")),
    };
    Ok(Some(command))
}

fn split_word(s: &str) -> (&str, &str) {
    let s = s.trim_start();
    match s.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (s, ""),
    }
}

/// Line-oriented editing loop. Ends on `quit` or end of input; the draft is
/// dropped either way.
fn run_session<R: BufRead, W: Write>(
    builder: &mut RecordBuilder,
    input: R,
    mut out: W,
) -> Result<(), CatalogError> {
    writeln!(out, "New ingredient form. Type 'help' for commands.")?;
    for line in input.lines() {
        let line = line?;
        let command = match parse_command(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(msg) => {
                writeln!(out, "! {msg}")?;
                continue;
            }
        };
        match command {
            SessionCommand::Set(field, value) => {
                if let Err(e) = builder.set_field(field, &value) {
                    writeln!(out, "! {e}")?;
                }
            }
            SessionCommand::Function(index, field, value) => {
                if let Err(e) = builder.set_function_field(index, field, &value) {
                    writeln!(out, "! {e}")?;
                }
            }
            SessionCommand::AddFunction => {
                builder.add_function_slot();
                writeln!(out, "Function #{} added.", builder.functions().len())?;
            }
            SessionCommand::RemoveFunction => {
                if builder.remove_function_slot() {
                    writeln!(out, "Removed; {} function(s) left.", builder.functions().len())?;
                } else {
                    writeln!(out, "! a record keeps at least one function")?;
                }
            }
            SessionCommand::Show => write_draft(&mut out, builder)?,
            SessionCommand::Submit => {
                let json = builder.submit()?;
                writeln!(out, "{json}")?;
                writeln!(out, "{PASTE_REMINDER}")?;
            }
            SessionCommand::Help => write_help(&mut out)?,
            SessionCommand::Quit => break,
        }
    }
    if builder.state() == BuilderState::Editing {
        tracing::debug!("session ended with unsubmitted edits");
    }
    Ok(())
}

fn write_draft<W: Write>(out: &mut W, builder: &RecordBuilder) -> io::Result<()> {
    let f = builder.form();
    writeln!(out, "inci:          {}", f.inci)?;
    writeln!(out, "name_ua:       {}", f.name_ua)?;
    writeln!(out, "origin:        {}", f.origin)?;
    writeln!(out, "nature:        {}", f.nature)?;
    writeln!(out, "ecology:       {}", f.ecology)?;
    writeln!(out, "physical_form: {}", f.physical_form)?;
    writeln!(out, "restrictions:  {}", f.restrictions)?;
    writeln!(
        out,
        "usage %:       gel [{}]  cream [{}]  tonic [{}]",
        f.usage_gel, f.usage_cream, f.usage_tonic
    )?;
    for (i, rule) in builder.functions().iter().enumerate() {
        writeln!(
            out,
            "function #{}:   if % [{}]  if pH [{}]  target [{}]  function [{}]",
            i + 1,
            rule.if_percent.as_deref().unwrap_or(""),
            rule.if_ph.as_deref().unwrap_or(""),
            rule.target.as_deref().unwrap_or(""),
            rule.function.as_deref().unwrap_or(""),
        )?;
    }
    Ok(())
}

fn write_help<W: Write>(out: &mut W) -> io::Result<()> {
    let fields: Vec<&str> = FormField::ALL.iter().map(|f| f.name()).collect();
    writeln!(out, "Commands:")?;
    writeln!(out, "  set <field> <value>         fields: {}", fields.join(", "))?;
    writeln!(out, "  fn <n> <part> <value>       parts: if_percent, if_ph, target, function")?;
    writeln!(out, "  add-fn                      add another function")?;
    writeln!(out, "  remove-fn                   remove the last function")?;
    writeln!(out, "  show                        print the current draft")?;
    writeln!(out, "  submit                      print the record as JSON")?;
    writeln!(out, "  quit                        leave (the draft is discarded)")?;
    Ok(())
}
