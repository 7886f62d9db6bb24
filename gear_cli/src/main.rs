//! # Gearcalc CLI Application
//!
//! Terminal front end for the gear_core rating engine: prompt for the basic
//! design parameters, run the ISO 6336 pipeline and print the safety-factor
//! summary, the step-by-step derivation report and a JSON result blob.

use std::io::{self, BufRead, Write};

use gear_core::{
    create_standard_gear_system, StrengthCalculator, MIN_BENDING_SAFETY, MIN_CONTACT_SAFETY,
};

fn prompt_f64(prompt: &str, default: f64) -> f64 {
    print!("{}", prompt);
    if io::stdout().flush().is_err() {
        return default;
    }

    let mut input = String::new();
    if io::stdin().lock().read_line(&mut input).is_err() {
        return default;
    }

    input.trim().parse().unwrap_or(default)
}

fn prompt_u32(prompt: &str, default: u32) -> u32 {
    print!("{}", prompt);
    if io::stdout().flush().is_err() {
        return default;
    }

    let mut input = String::new();
    if io::stdin().lock().read_line(&mut input).is_err() {
        return default;
    }

    input.trim().parse().unwrap_or(default)
}

fn main() {
    println!("Gearcalc CLI - ISO 6336 Gear Strength Rating");
    println!("============================================");
    println!();

    let module_mm = prompt_f64("Enter module (mm) [2.0]: ", 2.0);
    let teeth_pinion = prompt_u32("Enter pinion tooth count [20]: ", 20);
    let gear_ratio = prompt_f64("Enter gear ratio [5.0]: ", 5.0);
    let torque_nm = prompt_f64("Enter input torque (N·m) [20.0]: ", 20.0);
    let speed_rpm = prompt_f64("Enter input speed (rpm) [1500.0]: ", 1500.0);

    println!();
    println!("Rating standard spur gear pair (SCM415, 20° pressure angle)...");
    println!();

    let system = match create_standard_gear_system(module_mm, teeth_pinion, gear_ratio, torque_nm, speed_rpm) {
        Ok(system) => system,
        Err(e) => {
            report_error(&e);
            return;
        }
    };

    let mut calc = StrengthCalculator::new(
        system.geometry,
        system.load,
        system.material.clone(),
    );

    match calc.evaluate() {
        Ok(rating) => {
            println!("═══════════════════════════════════════");
            println!("  GEAR RATING RESULTS");
            println!("═══════════════════════════════════════");
            println!();
            println!("Input:");
            println!("  Module:       {:.1} mm", system.geometry.module_mm);
            println!(
                "  Teeth:        z1={}, z2={} (u={:.2})",
                system.geometry.teeth_pinion,
                system.geometry.teeth_gear,
                system.geometry.gear_ratio()
            );
            println!("  Face width:   {:.1} mm", system.geometry.face_width_mm);
            println!("  Torque:       {:.1} N·m at {:.0} rpm ({:.2} kW)",
                system.load.input_torque_nm,
                system.load.input_speed_rpm,
                system.load.power_kw
            );
            println!("  Material:     {}", system.material.name);
            println!();
            println!("Stresses:");
            println!("  Ft          = {:.1} N", rating.tangential_force_n);
            println!("  σF (pinion) = {:.2} MPa", rating.bending_stress_pinion_mpa);
            println!("  σF (gear)   = {:.2} MPa", rating.bending_stress_gear_mpa);
            println!("  σH          = {:.2} MPa", rating.contact_stress_mpa);
            println!();
            println!("Safety Checks:");
            println!(
                "  SF (pinion): {:.2} (min {:.1}) {}",
                rating.safety_bending_pinion,
                MIN_BENDING_SAFETY,
                status_icon(rating.safety_bending_pinion >= MIN_BENDING_SAFETY)
            );
            println!(
                "  SF (gear):   {:.2} (min {:.1}) {}",
                rating.safety_bending_gear,
                MIN_BENDING_SAFETY,
                status_icon(rating.safety_bending_gear >= MIN_BENDING_SAFETY)
            );
            println!(
                "  SH (contact): {:.2} (min {:.1}) {}",
                rating.safety_contact,
                MIN_CONTACT_SAFETY,
                status_icon(rating.safety_contact >= MIN_CONTACT_SAFETY)
            );
            println!();
            println!("═══════════════════════════════════════");
            println!(
                "  RESULT: {} (governs: {})",
                if rating.passes() { "PASS" } else { "FAIL" },
                rating.governing_condition()
            );
            println!("═══════════════════════════════════════");

            println!();
            println!("{}", calc.report());

            println!("JSON Output (for API use):");
            if let Ok(json) = serde_json::to_string_pretty(&rating) {
                println!("{}", json);
            }
        }
        Err(e) => report_error(&e),
    }
}

fn report_error(e: &gear_core::GearError) {
    eprintln!("Error: {}", e);
    if let Ok(json) = serde_json::to_string_pretty(e) {
        eprintln!();
        eprintln!("Error JSON:");
        eprintln!("{}", json);
    }
}

fn status_icon(pass: bool) -> &'static str {
    if pass {
        "[OK]"
    } else {
        "[FAIL]"
    }
}
