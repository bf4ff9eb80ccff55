use super::api;
use crate::shared::components::page_header::PageHeader;
use crate::shared::page_frame::{PageFrame, PAGE_CAT_USECASE};
use contracts::usecases::u501_import_csv::{validate_csv_file_name, EXPECTED_COLUMNS};
use leptos::html;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

const UPLOAD_FAILED: &str = "Wystąpił błąd podczas przesyłania pliku.";

#[component]
pub fn ImportCsvWidget() -> impl IntoView {
    let file_input: NodeRef<html::Input> = NodeRef::new();
    let (selected_name, set_selected_name) = signal(None::<String>);
    let (is_uploading, set_is_uploading) = signal(false);
    let (progress, set_progress) = signal(0u8);
    let (error_msg, set_error_msg) = signal(None::<String>);
    let (success_msg, set_success_msg) = signal(None::<String>);
    let show_progress = move || is_uploading.get() || progress.get() > 0;

    let selected_file = move || {
        file_input
            .get_untracked()
            .and_then(|input| input.files())
            .and_then(|files| files.get(0))
    };

    let handle_file_select = move |_ev: web_sys::Event| {
        set_selected_name.set(selected_file().map(|f| f.name()));
        set_error_msg.set(None);
        set_success_msg.set(None);
        set_progress.set(0);
    };

    let handle_upload = move |_| {
        if is_uploading.get_untracked() {
            return;
        }
        let file = selected_file();
        if let Err(e) = validate_csv_file_name(file.as_ref().map(|f| f.name()).as_deref()) {
            set_error_msg.set(Some(e.message().to_string()));
            return;
        }
        let Some(file) = file else {
            return;
        };

        set_is_uploading.set(true);
        set_error_msg.set(None);
        set_success_msg.set(None);
        set_progress.set(0);

        spawn_local(async move {
            let result = api::upload_csv(file, move |percent| {
                let _ = set_progress.try_set(percent);
            })
            .await;

            match result {
                Ok(response) => {
                    log::info!("CSV import finished");
                    let _ = set_success_msg.try_set(Some(response.display_message()));
                    let _ = set_selected_name.try_set(None);
                    if let Some(input) = file_input.try_get_untracked().flatten() {
                        input.set_value("");
                    }
                }
                Err(e) => {
                    log::error!("CSV import failed: {}", e);
                    let _ = set_progress.try_set(0);
                    let _ = set_error_msg.try_set(Some(e.error_field_or_body(UPLOAD_FAILED)));
                }
            }
            let _ = set_is_uploading.try_set(false);
        });
    };

    view! {
        <PageFrame page_id="u501_import_csv--usecase" category=PAGE_CAT_USECASE>
            <PageHeader
                title="Import danych z CSV"
                subtitle="Dodaj wiele samochodów naraz z pliku CSV"
                breadcrumbs=vec![("Panel", Some("/dashboard")), ("Import CSV", None)]
            />

            <div class="page__content">
                <Card>
                    {move || error_msg.get().map(|msg| view! { <div class="error-message">{msg}</div> })}
                    {move || success_msg.get().map(|msg| view! { <div class="success-message">{msg}</div> })}

                    <div class="form-group">
                        <label for="csv-file">"Plik CSV"</label>
                        <input
                            id="csv-file"
                            type="file"
                            accept=".csv"
                            node_ref=file_input
                            disabled=move || is_uploading.get()
                            on:change=handle_file_select
                        />
                        {move || selected_name.get().map(|name| view! {
                            <span class="upload__file-name">"Wybrany plik: " {name}</span>
                        })}
                    </div>

                    <Show when=show_progress>
                        <div class="progress" role="progressbar" aria-valuemin="0" aria-valuemax="100" aria-valuenow=move || progress.get()>
                            <div class="progress__bar" style:width=move || format!("{}%", progress.get())></div>
                            <span class="progress__label">{move || format!("{}%", progress.get())}</span>
                        </div>
                    </Show>

                    <Button
                        appearance=ButtonAppearance::Primary
                        disabled=Signal::derive(move || is_uploading.get())
                        on_click=handle_upload
                    >
                        {move || if is_uploading.get() { "Przesyłanie..." } else { "Prześlij plik" }}
                    </Button>
                </Card>

                <Card>
                    <h3>"Wymagany format pliku"</h3>
                    <p>"Pierwszy wiersz pliku musi zawierać nagłówki kolumn w następującej kolejności:"</p>
                    <ul class="upload__columns">
                        {EXPECTED_COLUMNS.iter().map(|column| view! { <li><code>{*column}</code></li> }).collect_view()}
                    </ul>
                </Card>
            </div>
        </PageFrame>
    }
}
