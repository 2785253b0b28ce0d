//! List operations, one per subcommand.

use super::ValueArg;
use crate::Commands;
use binlist_codec::RecordCodec;
use binlist_core::BinaryList;
use binlist_storage::StorageBackend;
use std::fmt::Display;
use std::io::Write;
use tracing::info;

/// Runs a single list operation and writes any output to `out`.
pub fn run<C, B, W>(
    list: &mut BinaryList<C, B>,
    command: Commands,
    out: &mut W,
) -> Result<(), Box<dyn std::error::Error>>
where
    C: RecordCodec,
    C::Value: ValueArg + Display,
    B: StorageBackend,
    W: Write,
{
    match command {
        Commands::Push { value, age } => {
            list.push_back(C::Value::from_arg(&value, age)?)?;
            info!(size = list.size(), "pushed value");
        }
        Commands::Insert { index, value, age } => {
            list.insert(index, C::Value::from_arg(&value, age)?)?;
            info!(index, size = list.size(), "inserted value");
        }
        Commands::Erase { index } => {
            list.erase(index)?;
            info!(index, size = list.size(), "erased value");
        }
        Commands::Get { index } => {
            writeln!(out, "{}", list.get(index)?)?;
        }
        Commands::Update { index, value, age } => {
            list.update(index, C::Value::from_arg(&value, age)?)?;
            info!(index, "updated value");
        }
        Commands::PopBack => {
            list.pop_back()?;
            info!(size = list.size(), "popped back");
        }
        Commands::PopFront => {
            list.pop_front()?;
            info!(size = list.size(), "popped front");
        }
        Commands::Clear => {
            list.clear()?;
            info!("cleared list");
        }
        Commands::Print => list.print_to(out)?,
        Commands::Size => writeln!(out, "{}", list.size())?,
        Commands::Sort => {
            list.sort()?;
            info!(size = list.size(), "sorted list");
        }
        Commands::Iter => {
            list.init_iterator();
            while list.has_next() {
                writeln!(out, "{}", list.next_value()?)?;
            }
        }
        Commands::Inspect { .. } | Commands::Verify | Commands::Version => {
            return Err(format!("{command:?} is not a list operation").into());
        }
    }

    list.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use binlist_codec::{I32Codec, PersonCodec, StringCodec};
    use binlist_core::Config;
    use tempfile::tempdir;

    fn exec<C>(list: &mut BinaryList<C>, command: Commands) -> String
    where
        C: RecordCodec,
        C::Value: ValueArg + Display,
    {
        let mut out = Vec::new();
        run(list, command, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn push(value: &str) -> Commands {
        Commands::Push {
            value: value.to_string(),
            age: None,
        }
    }

    #[test]
    fn int_commands_round_trip() {
        let dir = tempdir().unwrap();
        let mut list = BinaryList::open(dir.path().join("intList.bin"), I32Codec).unwrap();

        for value in ["5", "3", "8"] {
            exec(&mut list, push(value));
        }
        exec(&mut list, Commands::Sort);

        assert_eq!(exec(&mut list, Commands::Size), "3\n");
        assert_eq!(exec(&mut list, Commands::Get { index: 0 }), "3\n");
        assert_eq!(exec(&mut list, Commands::Iter), "3\n5\n8\n");
    }

    #[test]
    fn string_commands_edit_list() {
        let dir = tempdir().unwrap();
        let mut list = BinaryList::open(dir.path().join("strList.bin"), StringCodec).unwrap();

        exec(&mut list, push("a"));
        exec(&mut list, push("c"));
        exec(
            &mut list,
            Commands::Insert {
                index: 1,
                value: "b".to_string(),
                age: None,
            },
        );
        exec(
            &mut list,
            Commands::Update {
                index: 2,
                value: "cc".to_string(),
                age: None,
            },
        );
        exec(&mut list, Commands::PopFront);

        assert_eq!(
            exec(&mut list, Commands::Print),
            "list contents (size=2):\n  [0]: b\n  [1]: cc\n"
        );

        exec(&mut list, Commands::Erase { index: 0 });
        exec(&mut list, Commands::PopBack);
        assert_eq!(exec(&mut list, Commands::Print), "list is empty\n");
    }

    #[test]
    fn person_commands_use_age() {
        let dir = tempdir().unwrap();
        let mut list = BinaryList::open(dir.path().join("personList.bin"), PersonCodec).unwrap();

        exec(
            &mut list,
            Commands::Push {
                value: "Ann".to_string(),
                age: Some(31),
            },
        );

        assert_eq!(exec(&mut list, Commands::Get { index: 0 }), "Ann (age=31)\n");

        let mut out = Vec::new();
        assert!(run(&mut list, push("Bob"), &mut out).is_err());
        assert_eq!(list.size(), 1);
    }

    #[test]
    fn clear_empties_list() {
        let dir = tempdir().unwrap();
        let mut list = BinaryList::open(dir.path().join("intList.bin"), I32Codec).unwrap();
        exec(&mut list, push("1"));

        exec(&mut list, Commands::Clear);

        assert_eq!(exec(&mut list, Commands::Size), "0\n");
    }

    #[test]
    fn strict_rejection_surfaces_as_error() {
        let dir = tempdir().unwrap();
        let mut list = BinaryList::open_with_config(
            dir.path().join("intList.bin"),
            I32Codec,
            Config::new().strict_indices(true),
        )
        .unwrap();

        let mut out = Vec::new();
        assert!(run(&mut list, Commands::Get { index: 0 }, &mut out).is_err());
        assert!(run(&mut list, Commands::PopBack, &mut out).is_err());
    }

    #[test]
    fn reporting_commands_are_not_operations() {
        let dir = tempdir().unwrap();
        let mut list = BinaryList::open(dir.path().join("intList.bin"), I32Codec).unwrap();

        let mut out = Vec::new();
        assert!(run(&mut list, Commands::Verify, &mut out).is_err());
    }
}
