fn main() {
    // Boundary commands are invoked from the remote page, so they need
    // generated permissions that the default capability can grant.
    tauri_build::try_build(
        tauri_build::Attributes::new().app_manifest(
            tauri_build::AppManifest::new().commands(&["aspect_ratio", "window_drag"]),
        ),
    )
    .expect("failed to run tauri-build");
}
