use super::*;

#[test]
fn test_parse_up_defaults() {
    let cli = Cli::try_parse_from(["tm", "up"]).unwrap();
    match cli.command {
        Commands::Up(args) => {
            assert_eq!(args.limit, 0);
            assert!(!args.dry_run);
        }
        other => panic!("unexpected command: {other:?}"),
    }
    assert_eq!(cli.global.project_dir, PathBuf::from("."));
    assert!(!cli.global.verbose);
}

#[test]
fn test_parse_down_defaults_to_one_step() {
    let cli = Cli::try_parse_from(["tm", "down"]).unwrap();
    let Commands::Down(args) = cli.command else {
        panic!("expected down");
    };
    assert_eq!(args.max_steps(), 1);
}

#[test]
fn test_parse_down_all() {
    let cli = Cli::try_parse_from(["tm", "down", "--all"]).unwrap();
    let Commands::Down(args) = cli.command else {
        panic!("expected down");
    };
    assert_eq!(args.max_steps(), 0);
}

#[test]
fn test_down_limit_conflicts_with_all() {
    assert!(Cli::try_parse_from(["tm", "down", "--all", "--limit", "2"]).is_err());
}

#[test]
fn test_global_args_after_subcommand() {
    let cli = Cli::try_parse_from([
        "tm",
        "status",
        "--output",
        "json",
        "-v",
        "--project-dir",
        "/srv/app",
        "--database",
        "app.duckdb",
    ])
    .unwrap();
    assert!(cli.global.verbose);
    assert_eq!(cli.global.project_dir, PathBuf::from("/srv/app"));
    assert_eq!(cli.global.database.as_deref(), Some("app.duckdb"));
    let Commands::Status(args) = cli.command else {
        panic!("expected status");
    };
    assert_eq!(args.output, StatusOutput::Json);
}

#[test]
fn test_new_requires_name() {
    assert!(Cli::try_parse_from(["tm", "new"]).is_err());
    let cli = Cli::try_parse_from(["tm", "new", "create_users"]).unwrap();
    let Commands::New(args) = cli.command else {
        panic!("expected new");
    };
    assert_eq!(args.name, "create_users");
}
