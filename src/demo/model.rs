use serde::{Deserialize, Serialize};

/// Latitude/longitude pair, kept as text exactly as the dataset stores it
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Geolocation {
    pub lat: String,
    pub lng: String,
}

/// A Brazilian postal address keyed by its CEP.
///
/// Serialized field names follow the public CEP dataset (`logradouro`,
/// `bairro`, ...) so responses match what API consumers already expect.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub cep: String,
    #[serde(rename = "logradouro")]
    pub street: String,
    #[serde(rename = "complemento")]
    pub complement: String,
    #[serde(rename = "unidade")]
    pub unit: String,
    #[serde(rename = "bairro")]
    pub neighborhood: String,
    #[serde(rename = "localidade")]
    pub city: String,
    pub uf: String,
    #[serde(rename = "estado")]
    pub state: String,
    #[serde(rename = "regiao")]
    pub region: String,
    pub ibge: String,
    pub gia: String,
    pub ddd: String,
    pub siafi: String,
    #[serde(rename = "geolocalizacao")]
    pub geolocation: Geolocation,
}
