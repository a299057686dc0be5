use anyhow::{anyhow, Result};
use colored::*;
use serde::Deserialize;
use serde_json::json;
use std::io::{self, Write};

#[derive(Debug, Deserialize)]
struct PlannedStop {
    label: String,
    original_index: usize,
    latitude: f64,
    longitude: f64,
}

#[derive(Debug, Deserialize)]
struct PlanResponse {
    distance_meters: Option<f64>,
    duration_seconds: Option<f64>,
    stops: Vec<PlannedStop>,
}

#[tokio::main]
async fn main() -> Result<()> {
    println!("{}", "🚚 Route Planner Testing Tool".bright_blue().bold());
    println!("{}", "=====================================".bright_blue());
    println!();

    let base_url = std::env::var("ROUTE_PLANNER_URL")
        .unwrap_or_else(|_| "http://localhost:3000".to_string());
    let session_id = format!("testing-tool-{}", std::process::id());

    loop {
        println!();
        println!("{}", "📋 MENÚ PRINCIPAL".bright_green().bold());
        println!("{}", "==================".bright_green());
        println!("1. 🗺️  Planificar ruta");
        println!("2. 🔍 Probar parseo de dirección");
        println!("3. 🚪 Salir");
        let choice = prompt("Selecciona una opción (1-3): ")?;

        match choice.as_str() {
            "1" => {
                let addresses = read_addresses()?;
                if let Err(e) = plan_route(&base_url, &session_id, &addresses).await {
                    println!("{} {}", "❌".bright_red(), e.to_string().bright_red());
                }
            }
            "2" => {
                let address = prompt("Dirección: ")?;
                if let Err(e) = parse_address(&base_url, &address).await {
                    println!("{} {}", "❌".bright_red(), e.to_string().bright_red());
                }
            }
            "3" => {
                println!("{}", "👋 ¡Hasta luego!".bright_green());
                break;
            }
            _ => {
                println!("{}", "❌ Opción inválida. Intenta de nuevo.".bright_red());
            }
        }
    }

    Ok(())
}

fn prompt(label: &str) -> Result<String> {
    print!("{}", label.bright_yellow());
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

/// Origen, paradas intermedias (línea vacía para terminar) y destino
fn read_addresses() -> Result<Vec<String>> {
    println!("{}", "Formato: Calle, Número, [Barrio,] Ciudad[, Estado[, CEP]]".bright_cyan());

    let mut addresses = vec![prompt("Origen (ej: Rua das Borboletas, 22, Santos): ")?];
    loop {
        let stop = prompt(&format!("Parada {} (vacío para terminar): ", addresses.len()))?;
        if stop.is_empty() {
            break;
        }
        addresses.push(stop);
    }
    addresses.push(prompt("Destino (ej: Av. da Praia, 150, Santos): ")?);
    Ok(addresses)
}

async fn plan_route(base_url: &str, session_id: &str, addresses: &[String]) -> Result<()> {
    println!();
    println!("{}", "🧭 CALCULANDO RUTA OPTIMIZADA...".bright_cyan().bold());

    let payload = json!({ "session_id": session_id, "stops": addresses });
    let response = reqwest::Client::new()
        .post(format!("{}/api/route/plan", base_url))
        .json(&payload)
        .send()
        .await?;

    let status = response.status();
    let body: serde_json::Value = response.json().await?;
    if !status.is_success() {
        let message = body["message"].as_str().unwrap_or("unknown error");
        return Err(anyhow!("{} ({}): {}", status, body["stage"], message));
    }

    let plan: PlanResponse = serde_json::from_value(body)?;
    println!();
    for stop in &plan.stops {
        println!(
            "{:>12}  #{}  {:.6}, {:.6}",
            stop.label.bright_green(),
            stop.original_index + 1,
            stop.latitude,
            stop.longitude
        );
    }
    if let (Some(distance), Some(duration)) = (plan.distance_meters, plan.duration_seconds) {
        println!();
        println!(
            "{} {:.1} km, {:.0} min",
            "📏".bright_blue(),
            distance / 1000.0,
            duration / 60.0
        );
    }
    Ok(())
}

async fn parse_address(base_url: &str, address: &str) -> Result<()> {
    let response = reqwest::Client::new()
        .post(format!("{}/api/route/parse", base_url))
        .json(&json!({ "address": address }))
        .send()
        .await?;

    let body: serde_json::Value = response.json().await?;
    println!("{}", serde_json::to_string_pretty(&body)?);
    Ok(())
}
