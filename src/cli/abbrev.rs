// Command abbreviation matching for the taskpad CLI

/// Find all commands that start with the given prefix (case-insensitive)
pub fn find_matching_commands<'a>(prefix: &str, commands: &'a [&str]) -> Vec<&'a str> {
    let prefix_lower = prefix.to_lowercase();
    commands.iter()
        .filter(|cmd| cmd.to_lowercase().starts_with(&prefix_lower))
        .copied()
        .collect()
}

/// Find a unique command match for the given prefix
/// Exact matches take precedence over prefix matches.
/// Returns Err(matches) when ambiguous and Err(empty) when nothing matches.
pub fn find_unique_command<'a>(prefix: &str, commands: &'a [&str]) -> Result<&'a str, Vec<&'a str>> {
    let prefix_lower = prefix.to_lowercase();
    for cmd in commands {
        if cmd.to_lowercase() == prefix_lower {
            return Ok(*cmd);
        }
    }

    let matches = find_matching_commands(prefix, commands);
    match matches.len() {
        1 => Ok(matches[0]),
        _ => Err(matches),
    }
}

/// Top-level commands
pub const TOP_LEVEL_COMMANDS: &[&str] = &[
    "add", "list", "show", "done", "start", "modify", "move", "notes", "check",
    "week", "today", "myday", "delete", "undo", "habits", "export", "import",
    "reminders", "watch", "categories", "templates", "help",
];

/// Template subcommands
pub const TEMPLATE_COMMANDS: &[&str] = &["list", "apply"];

/// Get subcommands for a given top-level command
pub fn get_subcommands(command: &str) -> Option<&'static [&'static str]> {
    match command {
        "templates" => Some(TEMPLATE_COMMANDS),
        _ => None,
    }
}

fn ambiguity(kind: &str, arg: &str, matches: &[&str]) -> String {
    format!("Ambiguous {} '{}'. Did you mean one of: {}?", kind, arg, matches.join(", "))
}

/// Expand command abbreviations in the argument list
///
/// Only the command word and, for commands with subcommands, the word after
/// it are expanded. Unknown words pass through for clap to report.
pub fn expand_command_abbreviations(mut args: Vec<String>) -> Result<Vec<String>, String> {
    let Some(first) = args.first() else {
        return Ok(args);
    };
    if first.starts_with('-') || first.parse::<i64>().is_ok() {
        return Ok(args);
    }

    let command = match find_unique_command(first, TOP_LEVEL_COMMANDS) {
        Ok(command) => command,
        Err(matches) if matches.is_empty() => return Ok(args),
        Err(matches) => return Err(ambiguity("command", first, &matches)),
    };
    args[0] = command.to_string();

    let subcommand = match (get_subcommands(command), args.get(1)) {
        (Some(subcommands), Some(next)) if !next.starts_with('-') => {
            match find_unique_command(next, subcommands) {
                Ok(sub) => Some(sub),
                Err(matches) if matches.is_empty() => None,
                Err(matches) => return Err(ambiguity("subcommand", next, &matches)),
            }
        }
        _ => None,
    };
    if let Some(sub) = subcommand {
        args[1] = sub.to_string();
    }

    Ok(args)
}
