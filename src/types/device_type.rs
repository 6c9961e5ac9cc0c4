// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device type taxonomies for actuators and sensors.

use std::fmt;

use crate::types::api_constant;

api_constant! {
    /// Type of an actuator as configured on the gateway.
    ///
    /// # Examples
    ///
    /// ```
    /// use xs1_lib::types::ActuatorType;
    ///
    /// assert_eq!(ActuatorType::Dimmer, "dimmer");
    /// assert_ne!(ActuatorType::Dimmer, "disabled");
    /// assert_eq!(ActuatorType::Thermostat.as_str(), "temperature");
    /// ```
    pub enum ActuatorType("actuator type") {
        /// Slot is not in use.
        Disabled => "disabled",
        /// On/off switch.
        Switch => "switch",
        /// Dimmable light.
        Dimmer => "dimmer",
        /// Roller blind.
        Blind => "blind",
        /// Sun blind / awning.
        SunBlind => "sun-blind",
        /// Door opener.
        Door => "door",
        /// Window opener.
        Window => "window",
        /// Heating thermostat.
        Thermostat => "temperature",
        /// Sound output.
        Sound => "sound",
        /// Shutter.
        Shutter => "shutter",
        /// Switch with a timer.
        TimerSwitch => "timerswitch",
    }
}

impl ActuatorType {
    /// Returns `true` for types that behave like an on/off switch.
    #[must_use]
    pub const fn is_switch_like(&self) -> bool {
        matches!(self, Self::Switch | Self::Dimmer)
    }
}

api_constant! {
    /// Type of a sensor as configured on the gateway.
    pub enum SensorType("sensor type") {
        /// Slot is not in use.
        Disabled => "disabled",
        /// Generic sensor.
        Other => "other",
        /// Remote control or push button.
        RemoteControl => "remotecontrol",
        /// Thermometer.
        Temperature => "temperature",
        /// Relative humidity.
        Hygrometer => "hygrometer",
        /// Air pressure.
        Barometer => "barometer",
        /// Wind speed.
        WindSpeed => "windspeed",
        /// Wind direction.
        WindDirection => "winddirection",
        /// Variance of the wind direction.
        WindVariance => "windvariance",
        /// Wind gust speed.
        WindGust => "windgust",
        /// Brightness.
        Light => "light",
        /// Solar radiation.
        Pyranometer => "pyranometer",
        /// Rain amount.
        Rain => "rain",
        /// Rain intensity.
        RainIntensity => "rainintensity",
        /// Rain over the last hour.
        Rain1h => "rain_1h",
        /// Rain over the last 24 hours.
        Rain24h => "rain_24h",
        /// Soil temperature.
        SoilTemperature => "soiltemp",
        /// Soil moisture.
        SoilMoisture => "soilmoisture",
        /// Leaf wetness.
        LeafWetness => "leafwetness",
        /// Water level.
        WaterLevel => "waterlevel",
        /// Motion detector.
        Motion => "motion",
        /// Presence detector.
        Presence => "presence",
        /// Smoke detector.
        SmokeDetector => "smokedetector",
        /// Heat detector.
        HeatDetector => "heatdetector",
        /// Water leak detector.
        WaterDetector => "waterdetector",
        /// Air quality.
        AirQuality => "air_quality",
        /// Window contact.
        WindowOpen => "windowopen",
        /// Door contact.
        DoorOpen => "dooropen",
        /// Door bell.
        DoorBell => "doorbell",
        /// Alarm mat.
        AlarmMat => "alarmmat",
        /// Light barrier.
        LightBarrier => "lightbarrier",
        /// Fence detector.
        FenceDetector => "fencedetector",
        /// Mailbox contact.
        Mail => "mail",
        /// Carbon monoxide.
        GasCo => "gas_co",
        /// Butane.
        GasButane => "gas_butan",
        /// Methane.
        GasMethane => "gas_methan",
        /// Propane.
        GasPropane => "gas_propan",
        /// UV index.
        UvIndex => "uv_index",
        /// Power meter.
        PowerConsumption => "pwr_consump",
        /// Water meter.
        WaterConsumption => "wtr_consump",
        /// Gas meter.
        GasConsumption => "gas_consump",
        /// Oil meter.
        OilConsumption => "oil_consump",
        /// Peak power.
        PowerPeak => "pwr_peak",
        /// Peak water flow.
        WaterPeak => "wtr_peak",
        /// Peak gas flow.
        GasPeak => "gas_peak",
        /// Peak oil flow.
        OilPeak => "oil_peak",
    }
}

/// The resolved type of a device.
///
/// The `type` node of a device does not say which taxonomy it belongs to,
/// so a raw value is looked up against [`ActuatorType`] first, then against
/// [`SensorType`]. Records known to describe a sensor use
/// [`DeviceType::resolve_sensor`], which swaps the order. Values known to
/// neither are kept verbatim.
///
/// # Examples
///
/// ```
/// use xs1_lib::types::{ActuatorType, DeviceType, SensorType};
///
/// assert_eq!(DeviceType::resolve("switch"), DeviceType::Actuator(ActuatorType::Switch));
/// assert_eq!(DeviceType::resolve("motion"), DeviceType::Sensor(SensorType::Motion));
/// assert_eq!(DeviceType::resolve("hovercraft"), DeviceType::Other("hovercraft".into()));
/// assert!(DeviceType::resolve("disabled").is_disabled());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DeviceType {
    /// A type from the actuator taxonomy.
    Actuator(ActuatorType),
    /// A type from the sensor taxonomy.
    Sensor(SensorType),
    /// A type this release does not know about.
    Other(String),
}

impl DeviceType {
    /// Resolves a raw type string, actuator taxonomy first.
    #[must_use]
    pub fn resolve(value: &str) -> Self {
        if let Some(actuator) = ActuatorType::from_value(value) {
            Self::Actuator(actuator)
        } else if let Some(sensor) = SensorType::from_value(value) {
            Self::Sensor(sensor)
        } else {
            Self::Other(value.to_string())
        }
    }

    /// Resolves a raw type string reported for a sensor, sensor taxonomy
    /// first.
    #[must_use]
    pub fn resolve_sensor(value: &str) -> Self {
        if let Some(sensor) = SensorType::from_value(value) {
            Self::Sensor(sensor)
        } else if let Some(actuator) = ActuatorType::from_value(value) {
            Self::Actuator(actuator)
        } else {
            Self::Other(value.to_string())
        }
    }

    /// Returns the raw string value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Actuator(t) => t.as_str(),
            Self::Sensor(t) => t.as_str(),
            Self::Other(raw) => raw,
        }
    }

    /// Returns `true` if this is the taxonomy's "disabled" value.
    #[must_use]
    pub fn is_disabled(&self) -> bool {
        ActuatorType::Disabled == self.as_str()
    }

    /// Returns the actuator type, if this resolved to one.
    #[must_use]
    pub fn as_actuator(&self) -> Option<ActuatorType> {
        match self {
            Self::Actuator(t) => Some(*t),
            _ => None,
        }
    }

    /// Returns the sensor type, if this resolved to one.
    #[must_use]
    pub fn as_sensor(&self) -> Option<SensorType> {
        match self {
            Self::Sensor(t) => Some(*t),
            _ => None,
        }
    }
}

impl fmt::Display for DeviceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl PartialEq<str> for DeviceType {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<&str> for DeviceType {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

impl PartialEq<ActuatorType> for DeviceType {
    fn eq(&self, other: &ActuatorType) -> bool {
        other == self.as_str()
    }
}

impl PartialEq<SensorType> for DeviceType {
    fn eq(&self, other: &SensorType) -> bool {
        other == self.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn actuator_type_cross_equality() {
        assert_eq!(ActuatorType::Dimmer, ActuatorType::Dimmer);
        assert_eq!(ActuatorType::Dimmer, "dimmer");
        assert_eq!("dimmer", ActuatorType::Dimmer);
        assert_eq!(String::from("dimmer"), ActuatorType::Dimmer);
        assert_ne!(ActuatorType::Dimmer, ActuatorType::Disabled);
        assert_ne!(ActuatorType::Dimmer, "disabled");
        // the variant name is not the canonical value
        assert_ne!(ActuatorType::Dimmer, "Dimmer");
        assert!(["disabled"].iter().any(|v| ActuatorType::Disabled == *v));
    }

    #[test]
    fn resolve_prefers_actuator_taxonomy() {
        // "temperature" exists in both taxonomies
        assert_eq!(
            DeviceType::resolve("temperature"),
            DeviceType::Actuator(ActuatorType::Thermostat)
        );
        assert_eq!(
            DeviceType::resolve("hygrometer"),
            DeviceType::Sensor(SensorType::Hygrometer)
        );
    }

    #[test]
    fn resolve_sensor_prefers_sensor_taxonomy() {
        assert_eq!(
            DeviceType::resolve_sensor("temperature"),
            DeviceType::Sensor(SensorType::Temperature)
        );
        assert_eq!(
            DeviceType::resolve_sensor("switch"),
            DeviceType::Actuator(ActuatorType::Switch)
        );
        assert!(DeviceType::resolve_sensor("disabled").is_disabled());
        assert_eq!(
            DeviceType::resolve_sensor("teleporter"),
            DeviceType::Other("teleporter".to_string())
        );
    }

    #[test]
    fn resolve_passes_unknown_through() {
        let t = DeviceType::resolve("teleporter");
        assert_eq!(t, DeviceType::Other("teleporter".to_string()));
        assert_eq!(t.to_string(), "teleporter");
        assert!(!t.is_disabled());
    }

    #[test]
    fn sensor_type_count() {
        use crate::types::ApiConstant;
        assert_eq!(SensorType::ALL.len(), 46);
    }

    #[test]
    fn switch_like_types() {
        assert!(ActuatorType::Switch.is_switch_like());
        assert!(ActuatorType::Dimmer.is_switch_like());
        assert!(!ActuatorType::Blind.is_switch_like());
    }
}
