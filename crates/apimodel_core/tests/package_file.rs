use apimodel_core::{
    load_package, load_package_into_model, save_package, serialize_item, try_get_package_by_name,
    ApiClass, ApiEntryPoint, ApiItemOptions, ApiItemRef, ApiModel, ApiModelError, ApiPackage,
    ApiPackageOptions, DeclarationOptions, DocumentedOptions, PackageFileOptions,
    PACKAGE_FILE_SCHEMA_VERSION,
};
use serde_json::Value;
use std::rc::Rc;

fn widgets_package() -> ApiItemRef {
    let package: ApiItemRef = Rc::new(ApiPackage::new(ApiPackageOptions {
        item: ApiItemOptions::new("widgets"),
        documented: DocumentedOptions::new("Widget toolkit."),
    }));
    let entry_point: ApiItemRef = Rc::new(ApiEntryPoint::new(ApiItemOptions::new("")));
    package.add_member(Rc::clone(&entry_point)).unwrap();
    for name in ["Slider", "Button"] {
        let class: ApiItemRef = Rc::new(ApiClass::new(DeclarationOptions::named(name)));
        entry_point.add_member(class).unwrap();
    }
    package
}

#[test]
fn save_then_load_restores_the_package() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("widgets.api.json");
    let package = widgets_package();

    save_package(package.as_ref(), &path, &PackageFileOptions::default()).unwrap();
    let loaded = load_package(&path).unwrap();

    assert_eq!(serialize_item(loaded.as_ref()), serialize_item(package.as_ref()));
    assert!(loaded.parent().is_none());
}

#[test]
fn saved_file_carries_metadata_header() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("widgets.api.json");
    let options = PackageFileOptions {
        tool_package: "api-extractor".to_string(),
        tool_version: "7.0.0".to_string(),
        pretty: false,
    };

    save_package(widgets_package().as_ref(), &path, &options).unwrap();
    let text = std::fs::read_to_string(&path).unwrap();
    assert!(!text.contains('\n'));

    let document: Value = serde_json::from_str(&text).unwrap();
    assert_eq!(document["metadata"]["toolPackage"], "api-extractor");
    assert_eq!(document["metadata"]["toolVersion"], "7.0.0");
    assert_eq!(
        document["metadata"]["schemaVersion"],
        PACKAGE_FILE_SCHEMA_VERSION
    );
    assert_eq!(document["kind"], "Package");
    assert_eq!(document["members"][0]["members"][1]["name"], "Button");
}

#[test]
fn loading_into_model_attaches_package() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("widgets.api.json");
    save_package(
        widgets_package().as_ref(),
        &path,
        &PackageFileOptions::default(),
    )
    .unwrap();

    let model: ApiItemRef = Rc::new(ApiModel::default());
    let package = load_package_into_model(&model, &path).unwrap();

    let parent = package.parent().expect("package attached to model");
    assert_eq!(parent.canonical_reference(), "(model)");
    let found = try_get_package_by_name(model.as_ref(), "widgets").expect("package by name");
    assert_eq!(found.doc_comment(), Some("Widget toolkit."));

    let err = load_package_into_model(&model, &path).unwrap_err();
    assert!(matches!(err, ApiModelError::InvalidOperation(_)));
    assert_eq!(model.members().len(), 1);
}

#[test]
fn only_packages_can_be_saved_or_receive_loads() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("class.api.json");

    let class = ApiClass::new(DeclarationOptions::named("Loose"));
    let err = save_package(&class, &path, &PackageFileOptions::default()).unwrap_err();
    assert!(matches!(err, ApiModelError::InvalidOperation(_)));
    assert!(!path.exists());

    let not_a_model = widgets_package();
    let err = load_package_into_model(&not_a_model, &path).unwrap_err();
    assert!(matches!(err, ApiModelError::InvalidOperation(_)));
}

#[test]
fn missing_or_malformed_files_are_reported() {
    let dir = tempfile::tempdir().unwrap();

    let err = load_package(dir.path().join("absent.api.json")).unwrap_err();
    assert!(matches!(err, ApiModelError::Io(_)));

    let path = dir.path().join("garbage.api.json");
    std::fs::write(&path, "{ not json").unwrap();
    let err = load_package(&path).unwrap_err();
    assert!(matches!(err, ApiModelError::Json(_)));
}
