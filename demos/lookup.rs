use mapping_fn::{
    create_argument_map_fn, create_map_fn, create_reverse_map_fn, ArgumentMapOptions, MapKey,
    MapOptions, Mapping, Resolver, ReverseMapOptions,
};

const STATUSES: &str = r#"
1 = "active"
2 = "suspended"
3 = "archived"
"#;

fn main() -> Result<(), mapping_fn::Error> {
    let statuses: Mapping<MapKey, String> = Mapping::from_toml_str(STATUSES)?;

    let status = create_map_fn(
        statuses.clone(),
        MapOptions::new().default_with(|id: &MapKey| format!("unknown ({id})")),
    );
    let status_id = create_reverse_map_fn(&statuses, ReverseMapOptions::new());

    println!("status of 2: {}", status.map(&MapKey::Int(2))?);
    println!("status of 9: {}", status.map(&MapKey::Int(9))?);
    println!("id of archived: {}", status_id.map(&"archived".to_string())?);

    let greetings: Mapping<&str, Resolver<u32, String>> = Mapping::new()
        .with_resolver("en", |n: &u32| format!("hello x{n}"))
        .with_resolver("fr", |n: &u32| format!("bonjour x{n}"));
    let greet = create_argument_map_fn(greetings, ArgumentMapOptions::new());

    println!("{}", greet.map(&"fr", &3)?);
    if let Err(e) = greet.map(&"de", &3) {
        println!("error: {e}");
    }

    Ok(())
}
