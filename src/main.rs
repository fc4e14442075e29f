// src/main.rs

use tokio::net::TcpListener;

use lokasi_backend::app::build_router;
use lokasi_backend::config::AppState;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt().with_target(false).compact().init();

    // Jika konfigurasi gagal, aplikasi memang tidak boleh jalan.
    let app_state = AppState::new()
        .await
        .expect("Gagal menginisialisasi state aplikasi.");

    // Jalankan migrasi skema saat startup. Fungsi-fungsi fn_* di-deploy
    // bersama database oleh tim database, bukan dari repo ini.
    sqlx::migrate!()
        .run(&app_state.db_pool)
        .await
        .expect("Gagal menjalankan migrasi database.");
    tracing::info!("Migrasi database selesai");

    let app = build_router(app_state);

    let addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
    let listener = TcpListener::bind(&addr)
        .await
        .expect("Gagal membuka listener TCP");
    tracing::info!("Server mendengarkan di {}", listener.local_addr().unwrap());
    axum::serve(listener, app).await.expect("Server axum berhenti dengan error");
}
