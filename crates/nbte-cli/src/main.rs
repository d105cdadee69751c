use clap::{Args as ClapArgs, Parser, Subcommand};
use std::path::PathBuf;

use nbte_core::{Document, NodePath, SearchIndex, SearchQuery, Tag, TagKind};

#[derive(Parser, Debug)]
#[command(
    name = "nbte-cli",
    about = "Browse and edit NBT documents (raw, gzip, or zlib envelopes)",
    version
)]
struct Cli {
    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Dump a document as JSON
    Dump(FileArgs),
    /// Print every node as path / kind / value rows
    Tree(FileArgs),
    /// Print the node at a path
    Get(GetArgs),
    /// Set a scalar value from text (coerced to the node's kind)
    Set(SetArgs),
    /// Add a child under a compound (insert-or-replace)
    Add(AddArgs),
    /// Append an element to a list
    Append(AppendArgs),
    /// Remove the node at a path
    Remove(RemoveArgs),
    /// Search names and values; prints matching paths in index order
    Search(SearchArgs),
}

#[derive(ClapArgs, Debug)]
struct FileArgs {
    /// Document to load (.nbt / .dat)
    file: PathBuf,
}

#[derive(ClapArgs, Debug)]
struct GetArgs {
    /// Document to load
    file: PathBuf,
    /// Node path, e.g. /Level/Health or /Level/Pos/1
    #[arg(long)]
    path: String,
}

#[derive(ClapArgs, Debug)]
struct SetArgs {
    /// Document to load
    file: PathBuf,
    /// Node path of the scalar to change
    #[arg(long)]
    path: String,
    /// New value as text, e.g. 15, 3.5, "name"
    #[arg(long)]
    value: String,
    /// Write here instead of back to the input file
    #[arg(long)]
    out: Option<PathBuf>,
    /// Zip-backup the target before overwriting
    #[arg(long, default_value_t = false)]
    backup: bool,
}

#[derive(ClapArgs, Debug)]
struct AddArgs {
    /// Document to load
    file: PathBuf,
    /// Path of the parent compound
    #[arg(long, default_value = "/")]
    parent: String,
    /// Key of the new child
    #[arg(long)]
    key: String,
    /// Kind of the new child (Byte, Short, Int, Long, Float, Double,
    /// String, Compound, List, ...)
    #[arg(long, default_value = "String")]
    kind: String,
    /// Value as text; ignored for Compound and List, which start empty
    #[arg(long, default_value = "")]
    value: String,
    /// Write here instead of back to the input file
    #[arg(long)]
    out: Option<PathBuf>,
    /// Zip-backup the target before overwriting
    #[arg(long, default_value_t = false)]
    backup: bool,
}

#[derive(ClapArgs, Debug)]
struct AppendArgs {
    /// Document to load
    file: PathBuf,
    /// Path of the list to append to
    #[arg(long)]
    list: String,
    /// Kind of the new element
    #[arg(long)]
    kind: String,
    /// Value as text
    #[arg(long, default_value = "")]
    value: String,
    /// Write here instead of back to the input file
    #[arg(long)]
    out: Option<PathBuf>,
    /// Zip-backup the target before overwriting
    #[arg(long, default_value_t = false)]
    backup: bool,
}

#[derive(ClapArgs, Debug)]
struct RemoveArgs {
    /// Document to load
    file: PathBuf,
    /// Node path to remove
    #[arg(long)]
    path: String,
    /// Write here instead of back to the input file
    #[arg(long)]
    out: Option<PathBuf>,
    /// Zip-backup the target before overwriting
    #[arg(long, default_value_t = false)]
    backup: bool,
}

#[derive(ClapArgs, Debug)]
struct SearchArgs {
    /// Document to load
    file: PathBuf,
    /// Text or pattern to search for
    text: String,
    /// Match case exactly (default folds case)
    #[arg(long, default_value_t = false)]
    case_sensitive: bool,
    /// Treat the text as a regular expression
    #[arg(long, default_value_t = false)]
    regex: bool,
    /// Print at most this many matching paths
    #[arg(long)]
    limit: Option<usize>,
}

fn main() {
    match Cli::parse().cmd {
        Cmd::Dump(a) => cmd_dump(a),
        Cmd::Tree(a) => cmd_tree(a),
        Cmd::Get(a) => cmd_get(a),
        Cmd::Set(a) => cmd_set(a),
        Cmd::Add(a) => cmd_add(a),
        Cmd::Append(a) => cmd_append(a),
        Cmd::Remove(a) => cmd_remove(a),
        Cmd::Search(a) => cmd_search(a),
    }
}

fn load_doc(path: &std::path::Path) -> Document {
    Document::load(path).unwrap_or_else(|e| {
        eprintln!("error: {}", e);
        std::process::exit(2);
    })
}

fn write_back(mut doc: Document, input: &std::path::Path, out: Option<PathBuf>, backup: bool) {
    let target = out.unwrap_or_else(|| input.to_path_buf());
    if backup && target.is_file() {
        match nbte_core::editor::zip_backup_file(&target) {
            Ok(p) => eprintln!("backup: {}", p.display()),
            Err(e) => {
                eprintln!("backup failed: {}", e);
                std::process::exit(5);
            }
        }
    }
    doc.save_to(&target).unwrap_or_else(|e| {
        eprintln!("error writing: {}", e);
        std::process::exit(5);
    });
}

fn cmd_dump(args: FileArgs) {
    let doc = load_doc(&args.file);
    match nbte_core::json::dump_document_json(&doc) {
        Ok(s) => println!("{}", s),
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(2);
        }
    }
}

fn cmd_tree(args: FileArgs) {
    let doc = load_doc(&args.file);
    for entry in doc.snapshot() {
        println!(
            "{}\t{}\t{}",
            entry.path, entry.kind_label, entry.value_text
        );
    }
}

fn cmd_get(args: GetArgs) {
    let doc = load_doc(&args.file);
    let path = NodePath::parse(&args.path);
    match doc.resolve(&path) {
        Ok(node) => {
            let value = nbte_core::json::tag_to_json(node);
            println!(
                "{}\t{}",
                node.kind_label(),
                serde_json::to_string_pretty(&value).unwrap_or_default()
            );
        }
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(3);
        }
    }
}

fn cmd_set(args: SetArgs) {
    let mut doc = load_doc(&args.file);
    let path = NodePath::parse(&args.path);
    let kind = match doc.resolve(&path) {
        Ok(node) => node.kind(),
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(3);
        }
    };
    let tag = parse_or_exit(kind, &args.value);
    doc.set_value(&path, tag).unwrap_or_else(|e| {
        eprintln!("error: {}", e);
        std::process::exit(4);
    });
    write_back(doc, &args.file, args.out, args.backup);
}

fn cmd_add(args: AddArgs) {
    let mut doc = load_doc(&args.file);
    let parent = NodePath::parse(&args.parent);
    let kind = kind_or_exit(&args.kind);
    let tag = parse_or_exit(kind, &args.value);
    doc.insert_child(&parent, &args.key, tag).unwrap_or_else(|e| {
        eprintln!("error: {}", e);
        std::process::exit(4);
    });
    write_back(doc, &args.file, args.out, args.backup);
}

fn cmd_append(args: AppendArgs) {
    let mut doc = load_doc(&args.file);
    let list = NodePath::parse(&args.list);
    let kind = kind_or_exit(&args.kind);
    let tag = parse_or_exit(kind, &args.value);
    match doc.insert_element(&list, tag) {
        Ok(index) => {
            println!("{}", list.join_index(index));
            write_back(doc, &args.file, args.out, args.backup);
        }
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(4);
        }
    }
}

fn cmd_remove(args: RemoveArgs) {
    let mut doc = load_doc(&args.file);
    let path = NodePath::parse(&args.path);
    doc.delete_node(&path).unwrap_or_else(|e| {
        eprintln!("error: {}", e);
        std::process::exit(4);
    });
    write_back(doc, &args.file, args.out, args.backup);
}

fn cmd_search(args: SearchArgs) {
    if args.text.is_empty() {
        eprintln!("error: empty search text");
        std::process::exit(4);
    }
    let doc = load_doc(&args.file);
    let query = SearchQuery {
        text: args.text,
        case_sensitive: args.case_sensitive,
        use_regex: args.regex,
    };
    let index = SearchIndex::build(&doc, &query).unwrap_or_else(|e| {
        eprintln!("error: {}", e);
        std::process::exit(4);
    });
    if index.is_empty() {
        eprintln!("no matches");
        return;
    }
    let shown = args.limit.unwrap_or(usize::MAX);
    for path in index.matches().iter().take(shown) {
        println!("{}", path);
    }
    eprintln!("{} matches", index.len());
}

fn kind_or_exit(label: &str) -> TagKind {
    TagKind::from_label(label).unwrap_or_else(|| {
        eprintln!("error: unknown kind: {}", label);
        std::process::exit(4);
    })
}

fn parse_or_exit(kind: TagKind, text: &str) -> Tag {
    nbte_core::parse_tag(kind, text).unwrap_or_else(|e| {
        eprintln!("error: {}", e);
        std::process::exit(4);
    })
}
