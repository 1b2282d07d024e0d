use std::fs;

use game_content::{ContentFactory, ItemLoader};
use game_core::crafting::{craft, resolve};
use game_core::{CraftError, GameConfig, InventoryState, ItemHandle};

fn h(value: u32) -> ItemHandle {
    ItemHandle(value)
}

#[test]
fn empty_data_dir_uses_builtin_content() {
    let dir = tempfile::tempdir().unwrap();
    let factory = ContentFactory::new(dir.path());

    assert_eq!(factory.load_config().unwrap(), GameConfig::default());
    assert_eq!(factory.load_registry().unwrap().len(), 27);
}

#[test]
fn data_dir_files_override_builtins() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("config.toml"), "max_levels = 2\n").unwrap();
    fs::write(
        dir.path().join("items.ron"),
        r#"(items: [
            (handle: 1, name: "Fire", glyph: '^'),
            (handle: 2, name: "Some Earth", glyph: '~'),
            (handle: 9, name: "Some Sulphur", glyph: '*', recipe: [1, 2], ingredients: [2]),
        ])"#,
    )
    .unwrap();

    let factory = ContentFactory::new(dir.path());
    assert_eq!(factory.load_config().unwrap().max_levels, 2);
    let registry = factory.load_registry().unwrap();
    assert_eq!(registry.len(), 3);
    assert_eq!(registry.recipe_count(), 1);
}

#[test]
fn broken_files_are_errors() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("items.ron"), "(items: [").unwrap();
    let error = ContentFactory::new(dir.path()).load_items().unwrap_err();
    assert!(error.to_string().contains("items.ron"));
}

#[test]
fn catalogue_rejects_recipes_with_unknown_components() {
    let items = ItemLoader::parse(
        r#"(items: [
            (handle: 1, name: "Fire", glyph: '^'),
            (handle: 9, name: "Some Sulphur", glyph: '*', recipe: [1, 2], ingredients: [2]),
        ])"#,
    )
    .unwrap();
    assert!(ItemLoader::registry(items).is_err());
}

#[test]
fn tempered_blade_resolves_in_any_order() {
    let registry = ItemLoader::registry(ItemLoader::builtin().unwrap()).unwrap();
    for inputs in [
        [h(20), h(3), h(1)],
        [h(1), h(3), h(20)],
        [h(3), h(1), h(20)],
    ] {
        let definition = resolve(&registry, &inputs).unwrap();
        assert_eq!(definition.handle, h(26));
        assert_eq!(definition.name, "A Tempered Blade");
    }
}

#[test]
fn sulphur_consumes_one_earth_and_keeps_fire() {
    let registry = ItemLoader::registry(ItemLoader::builtin().unwrap()).unwrap();
    let mut inventory = InventoryState::with_items([h(1), h(2), h(2)]);

    let outcome = craft(&registry, &mut inventory, &[h(1), h(2)]).unwrap();
    assert_eq!(outcome.crafted, h(9));
    assert_eq!(
        inventory.handles().collect::<Vec<_>>(),
        vec![h(1), h(2), h(9)]
    );
}

#[test]
fn unregistered_combination_changes_nothing() {
    let registry = ItemLoader::registry(ItemLoader::builtin().unwrap()).unwrap();
    let mut inventory = InventoryState::with_items([h(1), h(2)]);
    let before = inventory.clone();

    let error = craft(&registry, &mut inventory, &[h(99), h(100)]).unwrap_err();
    assert!(matches!(error, CraftError::NoRecipe { .. }));
    assert_eq!(inventory, before);
}

#[test]
fn every_recipe_is_order_independent() {
    let registry = ItemLoader::registry(ItemLoader::builtin().unwrap()).unwrap();
    for definition in ItemLoader::builtin().unwrap() {
        if definition.recipe.len() < 2 {
            continue;
        }
        let mut reversed = definition.recipe.clone();
        reversed.reverse();
        assert_eq!(
            resolve(&registry, &reversed).unwrap().handle,
            definition.handle
        );
    }
}
