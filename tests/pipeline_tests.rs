/// End-to-end tests for the translator
/// Demonstrates: Scanner → Parser → Resolver working together
use cfgdsl::lexer::Scanner;
use cfgdsl::parser::ConfigParser;
use cfgdsl::runtime::{Resolver, Table, Value};
use cfgdsl::{translate, Substitution, TranslateOptions};

fn run(source: &str) -> Table {
    translate(source, &TranslateOptions::default()).unwrap()
}

#[test]
fn test_e2e_basic() {
    let source = "name = [[test]];\nport = 8080;";

    // Lex
    let mut scanner = Scanner::new(source);
    let tokens = scanner.scan_tokens().unwrap();

    // Parse
    let mut parser = ConfigParser::new(tokens);
    let program = parser.parse().unwrap();

    // Resolve
    let result = Resolver::default().resolve(&program.statements);

    assert_eq!(result.get("name"), Some(&Value::from("test")));
    assert_eq!(result.get("port"), Some(&Value::Int(8080)));
}

#[test]
fn test_e2e_structure_follows_source() {
    let source = r#"
        title = [[demo]];
        database @{
            host = [[db.local]];
            pool @{
                min = 1;
                max = 16;
            };
            timeout = 2.5;
        };
        debug = false;
    "#;

    let result = run(source);

    let keys: Vec<&str> = result.keys().collect();
    assert_eq!(keys, vec!["title", "database", "debug"]);

    let database = result.get("database").and_then(Value::as_table).unwrap();
    let keys: Vec<&str> = database.keys().collect();
    assert_eq!(keys, vec!["host", "pool", "timeout"]);
    assert_eq!(database.get("timeout"), Some(&Value::Float(2.5)));

    assert_eq!(result.get_path("database.pool.max"), Some(&Value::Int(16)));
    assert_eq!(result.get("debug"), Some(&Value::Bool(false)));
}

#[test]
fn test_e2e_expressions() {
    let source = r#"
        workers = 4;
        per_worker = 250;
        capacity = $workers per_worker *$;
        half = $capacity 2 /$;
        share = $per_worker 3 /$;
        safe = $capacity 0 /$;
    "#;

    let result = run(source);

    assert_eq!(result.get("capacity"), Some(&Value::Int(1000)));
    assert_eq!(result.get("half"), Some(&Value::Int(500)));
    assert_eq!(result.get("share"), Some(&Value::Float(250.0 / 3.0)));
    assert_eq!(result.get("safe"), Some(&Value::Int(0)));
}

#[test]
fn test_e2e_block_namespace() {
    let source = r#"
        server @{
            port = 8080;
        };
        proxy_port = $server.port 1 +$;
    "#;

    let result = run(source);
    assert_eq!(result.get("proxy_port"), Some(&Value::Int(8081)));
}

#[test]
fn test_e2e_block_keys_reach_later_siblings() {
    let source = "a @{ port = 1; }; b @{ x = $port 1 +$; }; y = $port 1 +$;";

    for substitution in [Substitution::WholeToken, Substitution::Textual] {
        let options = TranslateOptions::default().with_substitution(substitution);
        let result = translate(source, &options).unwrap();

        assert_eq!(result.get_path("b.x"), Some(&Value::Int(2)));
        assert_eq!(result.get("y"), Some(&Value::Int(2)));
    }
}

#[test]
fn test_e2e_block_assignment_form() {
    let result = run("config = @{ key = [[value]]; };");

    let config = result.get("config").and_then(Value::as_table).unwrap();
    assert_eq!(config.get("key"), Some(&Value::from("value")));
}

#[test]
fn test_e2e_unevaluable_expression_placeholder() {
    let result = run("a = $1 +$; b = $[[x]]$; c = 3;");

    assert_eq!(result.get("a"), Some(&Value::from("${1 +}")));
    // a single word that is neither bound nor numeric stays as text
    assert_eq!(result.get("b"), Some(&Value::from("[[x]]")));
    assert_eq!(result.get("c"), Some(&Value::Int(3)));
}

#[test]
fn test_e2e_textual_substitution() {
    let source = "host = 10; hostname = [[edge]]; v = $hostname$;";

    let whole = run(source);
    assert_eq!(whole.get("v"), Some(&Value::from("edge")));

    let options = TranslateOptions::default().with_substitution(Substitution::Textual);
    let textual = translate(source, &options).unwrap();
    // `host` is replaced inside `hostname` before `hostname` is looked at
    assert_eq!(textual.get("v"), Some(&Value::from("10name")));
}

#[test]
fn test_e2e_idempotent() {
    let source = "a = 1; b @{ c = $a 1 +$; }; d = $b.c 1 +$;";
    assert_eq!(run(source), run(source));
}

#[test]
fn test_e2e_serializes_in_document_order() {
    let source = "zeta = 1; alpha @{ on = true; ratio = 0.5; }; name = [[x]];";

    let json = serde_json::to_string(&run(source)).unwrap();
    assert_eq!(
        json,
        r#"{"zeta":1,"alpha":{"on":true,"ratio":0.5},"name":"x"}"#
    );
}
