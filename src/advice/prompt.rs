//! Prompt construction for the advice generator

use super::AdviceContext;

/// Build the natural-language prompt for a driving scenario.
///
/// The reply is requested as bare JSON with the five advice fields.
#[must_use]
pub fn build_prompt(context: &AdviceContext<'_>) -> String {
    let AdviceContext {
        route,
        weather,
        vehicle,
    } = context;

    format!(
        "Analyze this driving scenario and provide concise, friendly recommendations:
- Route: {distance} km, about {duration:.1} minutes
- Weather: {conditions} and {temp}°C
- Vehicle: {fuel} ({weight} kg)

Give me brief, friendly driving tips (1-2 sentences each):
- recommended_speed_kmh: Just the number (e.g., 85)
- throttle_advice: Brief advice about acceleration and fuel efficiency
- terrain_advice: Short tips about road conditions and safety
- safety_message: One encouraging safety reminder
- extra_tips: Quick comfort or entertainment suggestion

Output as JSON only. Keep all text values concise and friendly.",
        distance = route.distance_km,
        duration = route.duration_min,
        conditions = weather.conditions,
        temp = weather.temp_c,
        fuel = vehicle.fuel_type,
        weight = vehicle.weight_kg,
    )
}
