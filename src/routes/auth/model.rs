use serde::Deserialize;

use crate::api::models::User;

pub const RFC_REQUIRED: &str = "El RFC es requerido";
pub const AUTH_SUCCESS: &str = "Autenticación exitosa";
pub const AUTH_FAILED: &str = "Ha ocurrido un error durante la autenticación";

#[derive(Debug, Default, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub rfc: String,
}

impl LoginForm {
    /// The trimmed RFC, or the validation message.
    pub fn validate(&self) -> Result<&str, &'static str> {
        match self.rfc.trim() {
            "" => Err(RFC_REQUIRED),
            rfc => Ok(rfc),
        }
    }
}

/// Where a freshly signed-in member lands.
pub fn landing_for(user: &User) -> &'static str {
    if user.is_admin() {
        "/admin/estadisticas"
    } else {
        "/votar"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rfc_is_required() {
        let form = |rfc: &str| LoginForm { rfc: rfc.into() };
        assert_eq!(form("").validate(), Err(RFC_REQUIRED));
        assert_eq!(form("   ").validate(), Err(RFC_REQUIRED));
        assert_eq!(form(" PEJJ800101AB1 ").validate(), Ok("PEJJ800101AB1"));
    }

    #[test]
    fn landing_depends_on_role() {
        let mut user = User {
            id: 1,
            rfc: "PEJJ800101AB1".into(),
            nombre: "Juan".into(),
            correo_electronico: "juan@example.com".into(),
            membresia: 2,
            membresia_nombre: "Administrador".into(),
            estatus: "activo".into(),
        };
        assert_eq!(landing_for(&user), "/admin/estadisticas");
        user.membresia = 1;
        assert_eq!(landing_for(&user), "/votar");
    }
}
